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

use crate::agent::AgentId;
use crate::{HashMap, Int};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: Int,
    pub y: Int,
}

impl Coordinate {
    pub fn new(x: Int, y: Int) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A bounded (non-toroidal) lattice where every cell holds any number of occupants. A robot can
/// share a cell with other robots and with the dirt marker it is about to clean.
///
/// The grid only tracks which agent ids sit where. Keeping that in sync with each agent's own
/// position is the job of the caller; see `World`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiGrid {
    width: Int,
    height: Int,
    cells: HashMap<Coordinate, Vec<AgentId>>,
}

impl MultiGrid {
    pub fn new(width: Int, height: Int) -> Self {
        Self {
            width,
            height,
            cells: HashMap::default(),
        }
    }

    pub fn width(&self) -> Int {
        self.width
    }

    pub fn height(&self) -> Int {
        self.height
    }

    pub fn total_cells(&self) -> Int {
        self.width * self.height
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (0..self.width).contains(&coordinate.x) && (0..self.height).contains(&coordinate.y)
    }

    /// The Moore neighborhood of `center`: up to eight surrounding cells, never the center
    /// itself. Cells that would fall off the edge are dropped rather than wrapped. Neighbors are
    /// listed column by column, lowest x first, then lowest y first.
    pub fn neighborhood(&self, center: Coordinate) -> Vec<Coordinate> {
        let mut neighbors = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let candidate = Coordinate::new(center.x + dx, center.y + dy);
                if self.contains(candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    pub fn place(&mut self, id: AgentId, at: Coordinate) {
        debug_assert!(self.contains(at), "placing {} outside the grid at {}", id, at);
        self.cells.entry(at).or_default().push(id);
    }

    /// Moves the occupancy record for `id` from one cell to another. Relative order of the
    /// remaining occupants in the old cell is preserved, and the mover goes to the back of the
    /// new cell.
    pub fn move_occupant(&mut self, id: AgentId, from: Coordinate, to: Coordinate) {
        debug_assert!(self.contains(to), "moving {} outside the grid to {}", id, to);
        if let Some(occupants) = self.cells.get_mut(&from) {
            if let Some(index) = occupants.iter().position(|&other| other == id) {
                occupants.remove(index);
            }
            if occupants.is_empty() {
                self.cells.remove(&from);
            }
        }
        self.place(id, to);
    }

    /// Ids currently at `at`, in the order they arrived.
    pub fn cell_contents(&self, at: Coordinate) -> &[AgentId] {
        self.cells.get(&at).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_cell_empty(&self, at: Coordinate) -> bool {
        self.cell_contents(at).is_empty()
    }

    /// Every cell with no occupant, row by row.
    pub fn empty_cells(&self) -> Vec<Coordinate> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coordinate::new(x, y)))
            .filter(|&c| self.is_cell_empty(c))
            .collect()
    }
}
