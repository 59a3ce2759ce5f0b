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

use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;
use crate::Moves;

/// Identifier handed out once per agent in creation order. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a dirt marker still needs cleaning. Only ever goes from Dirty to Cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirtState {
    Dirty,
    Cleaned,
}

/// What sits in a cell. Dirt markers are stationary; only robots carry a move counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Dirt(DirtState),
    Robot { steps_moved: Moves },
}

/// Flat state tag used when describing cell contents to observers. Discriminants follow the
/// conventional numbering: dirty 0, robot 1, cleaned 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    Dirty = 0,
    Robot = 1,
    Cleaned = 2,
}

/// Read-only view of one occupant, as returned by cell queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupantDescriptor {
    pub id: AgentId,
    pub state: AgentState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: AgentId,
    position: Coordinate,
    occupant: Occupant,
}

impl Agent {
    pub fn dirt(id: AgentId, position: Coordinate) -> Self {
        Self {
            id,
            position,
            occupant: Occupant::Dirt(DirtState::Dirty),
        }
    }

    pub fn robot(id: AgentId, position: Coordinate) -> Self {
        Self {
            id,
            position,
            occupant: Occupant::Robot { steps_moved: 0 },
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn state(&self) -> AgentState {
        match self.occupant {
            Occupant::Dirt(DirtState::Dirty) => AgentState::Dirty,
            Occupant::Dirt(DirtState::Cleaned) => AgentState::Cleaned,
            Occupant::Robot { .. } => AgentState::Robot,
        }
    }

    pub fn describe(&self) -> OccupantDescriptor {
        OccupantDescriptor {
            id: self.id,
            state: self.state(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.occupant == Occupant::Dirt(DirtState::Dirty)
    }

    /// Moves taken so far, or None for dirt markers.
    pub fn steps_moved(&self) -> Option<Moves> {
        match self.occupant {
            Occupant::Robot { steps_moved } => Some(steps_moved),
            Occupant::Dirt(_) => None,
        }
    }

    /// Marks a dirty marker as cleaned. Returns false when there was nothing to clean, which
    /// includes robots and markers that were already cleaned.
    pub(crate) fn clean(&mut self) -> bool {
        if self.is_dirty() {
            self.occupant = Occupant::Dirt(DirtState::Cleaned);
            true
        } else {
            false
        }
    }

    /// Records a robot relocation. The grid is responsible for moving the occupancy record.
    pub(crate) fn record_move(&mut self, to: Coordinate) {
        if let Occupant::Robot { steps_moved } = &mut self.occupant {
            self.position = to;
            *steps_moved = steps_moved.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirt_starts_dirty_and_has_no_counter() {
        let dirt = Agent::dirt(AgentId(0), Coordinate { x: 1, y: 2 });
        assert!(dirt.is_dirty());
        assert_eq!(dirt.state(), AgentState::Dirty);
        assert_eq!(dirt.steps_moved(), None);
    }

    #[test]
    fn test_cleaning_is_one_way() {
        let mut dirt = Agent::dirt(AgentId(0), Coordinate { x: 0, y: 0 });
        assert!(dirt.clean());
        assert_eq!(dirt.state(), AgentState::Cleaned);
        assert!(!dirt.clean());
        assert_eq!(dirt.state(), AgentState::Cleaned);
    }

    #[test]
    fn test_robot_cannot_be_cleaned() {
        let mut robot = Agent::robot(AgentId(3), Coordinate { x: 0, y: 0 });
        assert!(!robot.clean());
        assert_eq!(robot.state(), AgentState::Robot);
    }

    #[test]
    fn test_record_move_counts_robot_moves_only() {
        let mut robot = Agent::robot(AgentId(1), Coordinate { x: 0, y: 0 });
        robot.record_move(Coordinate { x: 1, y: 1 });
        robot.record_move(Coordinate { x: 1, y: 0 });
        assert_eq!(robot.steps_moved(), Some(2));
        assert_eq!(robot.position(), Coordinate { x: 1, y: 0 });

        let mut dirt = Agent::dirt(AgentId(0), Coordinate { x: 2, y: 2 });
        dirt.record_move(Coordinate { x: 1, y: 1 });
        assert_eq!(dirt.position(), Coordinate { x: 2, y: 2 });
        assert_eq!(dirt.steps_moved(), None);
    }

    #[test]
    fn test_move_counter_saturates() {
        let mut robot = Agent {
            id: AgentId(0),
            position: Coordinate { x: 0, y: 0 },
            occupant: Occupant::Robot {
                steps_moved: Moves::MAX,
            },
        };
        robot.record_move(Coordinate { x: 1, y: 0 });
        assert_eq!(robot.steps_moved(), Some(Moves::MAX));
        assert_eq!(robot.position(), Coordinate { x: 1, y: 0 });
    }
}
