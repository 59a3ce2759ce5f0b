/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use crate::agent::AgentId;
use crate::Int;

/// Activates every registered agent once per pass, in registration order.
///
/// Activation is sequential: an agent's whole behavior runs before the next agent starts, so
/// later agents see the grid as left by earlier ones in the same pass. There is no separate
/// "collect intentions, then apply" phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimultaneousActivation {
    agents: Vec<AgentId>,
    passes: Int,
}

impl SimultaneousActivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: AgentId) {
        self.agents.push(id);
    }

    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Completed passes.
    pub fn passes(&self) -> Int {
        self.passes
    }

    /// Runs one pass, handing each registered agent to `activate` exactly once.
    pub fn step<F>(&mut self, mut activate: F)
    where
        F: FnMut(AgentId),
    {
        for &id in &self.agents {
            activate(id);
        }
        self.passes += 1;
    }
}
