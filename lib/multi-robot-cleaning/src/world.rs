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

use rand::seq::SliceRandom;
use rand::Rng as _;
use tracing::debug;

use crate::agent::{Agent, AgentId};
use crate::error::CleaningError;
use crate::grid::{Coordinate, MultiGrid};
use crate::{Int, Rng};

/// Draws of a random cell before dirt placement falls back to picking among the cells that are
/// known to be empty.
const MAX_REJECTED_DRAWS: u32 = 256;

/// Where robots start.
pub const ROBOT_START: Coordinate = Coordinate { x: 0, y: 0 };

/// The grid, every agent on it and the clean-cell tally. Robot behavior lives here because it is
/// the only thing that mutates occupancy.
///
/// Agents are stored by id, so `agents[id.0]` is always the agent with that id.
#[derive(Debug, Clone)]
pub struct World {
    grid: MultiGrid,
    agents: Vec<Agent>,
    clean: Int,
    rng: Rng,
}

impl World {
    /// Builds an empty world whose clean tally assumes `quantity_dirty` markers will be placed.
    pub(crate) fn new(width: Int, height: Int, quantity_dirty: Int, rng: Rng) -> Self {
        let grid = MultiGrid::new(width, height);
        let clean = grid.total_cells() - quantity_dirty;
        Self {
            grid,
            agents: Vec::new(),
            clean,
            rng,
        }
    }

    pub fn grid(&self) -> &MultiGrid {
        &self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    /// Cells currently counted as clean.
    pub fn clean(&self) -> Int {
        self.clean
    }

    /// Places `quantity` dirt markers on distinct empty cells chosen uniformly at random.
    pub(crate) fn place_dirt(&mut self, quantity: Int) -> Result<(), CleaningError> {
        for placed in 0..quantity {
            let at = self
                .sample_empty_cell()
                .ok_or_else(|| CleaningError::PlacementExhausted {
                    requested: quantity,
                    placed,
                    total: self.grid.total_cells(),
                })?;
            let id = AgentId(self.agents.len());
            self.agents.push(Agent::dirt(id, at));
            self.grid.place(id, at);
        }
        debug!(quantity, "placed dirt markers");
        Ok(())
    }

    /// Rejection-samples a cell with no occupant at all. After `MAX_REJECTED_DRAWS` misses the
    /// cell is drawn from an explicit list of empty cells instead, which has the same
    /// distribution but cannot spin on a nearly full grid.
    fn sample_empty_cell(&mut self) -> Option<Coordinate> {
        for _ in 0..MAX_REJECTED_DRAWS {
            let x = self.rng.gen_range(0..self.grid.width());
            let y = self.rng.gen_range(0..self.grid.height());
            let candidate = Coordinate::new(x, y);
            if self.grid.is_cell_empty(candidate) {
                return Some(candidate);
            }
        }
        self.grid.empty_cells().choose(&mut self.rng).copied()
    }

    /// Puts `count` robots on the start cell and returns their ids in creation order. Robots
    /// ignore whatever else is already there.
    pub(crate) fn place_robots(&mut self, count: Int) -> Vec<AgentId> {
        let ids: Vec<AgentId> = (0..count)
            .map(|_| {
                let id = AgentId(self.agents.len());
                self.agents.push(Agent::robot(id, ROBOT_START));
                self.grid.place(id, ROBOT_START);
                id
            })
            .collect();
        debug!(count, at = %ROBOT_START, "placed robots");
        ids
    }

    /// One activation of robot `id`: clean whatever dirt shares its cell, then move.
    ///
    /// Every dirt marker cleaned triggers its own move before the final unconditional one, so a
    /// single activation can move a robot more than once. This looks accidental but it feeds the
    /// reported movement totals, so it stays.
    pub(crate) fn activate_robot(&mut self, id: AgentId) {
        let here = self.agents[id.0].position();
        let occupants = self.grid.cell_contents(here).to_vec();
        if occupants.len() > 1 {
            for other in occupants {
                if other == id {
                    continue;
                }
                if self.agents[other.0].clean() {
                    self.clean += 1;
                    self.move_robot(id);
                }
            }
        }
        self.move_robot(id);
    }

    /// Moves robot `id` to a uniformly random Moore neighbor. A robot with no neighbor stays put
    /// and its counter is not bumped.
    fn move_robot(&mut self, id: AgentId) {
        let from = self.agents[id.0].position();
        let neighbors = self.grid.neighborhood(from);
        if let Some(&to) = neighbors.choose(&mut self.rng) {
            self.grid.move_occupant(id, from, to);
            self.agents[id.0].record_move(to);
        }
    }

    /// Whether every agent is listed in exactly the cell matching its position and no cell lists
    /// anything else.
    pub fn occupancy_is_consistent(&self) -> bool {
        let listed_where_it_stands = self.agents.iter().all(|agent| {
            self.grid
                .cell_contents(agent.position())
                .iter()
                .filter(|&&id| id == agent.id())
                .count()
                == 1
        });
        let listed: usize = (0..self.grid.height())
            .flat_map(|y| (0..self.grid.width()).map(move |x| Coordinate::new(x, y)))
            .map(|c| self.grid.cell_contents(c).len())
            .sum();
        listed_where_it_stands && listed == self.agents.len()
    }
}
