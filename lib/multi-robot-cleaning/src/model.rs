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

use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::agent::{AgentState, OccupantDescriptor};
use crate::error::CleaningError;
use crate::grid::Coordinate;
use crate::schedule::SimultaneousActivation;
use crate::world::World;
use crate::{Float, Int, Model, Moves, Rng};

/// Parameters for one run. Deserializable so a harness can read it from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub width: Int,
    pub height: Int,
    pub robots: Int,

    /// Share of cells that start dirty, from 0 to 100.
    pub dirt_percentage: Float,

    /// Step budget. The scheduler never runs more passes than this.
    pub max_steps: Int,

    /// Seed for the run's random source. Equal seeds give identical runs.
    pub seed: u64,
}

impl ModelConfig {
    pub fn new(
        width: Int,
        height: Int,
        robots: Int,
        dirt_percentage: Float,
        max_steps: Int,
        seed: u64,
    ) -> Self {
        Self {
            width,
            height,
            robots,
            dirt_percentage,
            max_steps,
            seed,
        }
    }

    /// Checks every parameter and returns the total number of cells.
    pub fn validate(&self) -> Result<Int, CleaningError> {
        if self.width <= 0 {
            return Err(CleaningError::invalid(
                "width",
                format!("must be positive, got {}", self.width),
            ));
        }
        if self.height <= 0 {
            return Err(CleaningError::invalid(
                "height",
                format!("must be positive, got {}", self.height),
            ));
        }
        let total = self
            .width
            .checked_mul(self.height)
            .ok_or_else(|| CleaningError::invalid("width", "width * height overflows"))?;
        if total < 2 {
            return Err(CleaningError::invalid(
                "width",
                "a 1x1 grid leaves robots no neighboring cell to move to",
            ));
        }
        if self.robots < 0 {
            return Err(CleaningError::invalid(
                "robots",
                format!("must not be negative, got {}", self.robots),
            ));
        }
        if !(0.0..=100.0).contains(&self.dirt_percentage) {
            return Err(CleaningError::invalid(
                "dirt_percentage",
                format!("must be within [0, 100], got {}", self.dirt_percentage),
            ));
        }
        if self.max_steps < 0 {
            return Err(CleaningError::invalid(
                "max_steps",
                format!("must not be negative, got {}", self.max_steps),
            ));
        }
        Ok(total)
    }

    /// Number of dirt markers this configuration asks for, rounded down.
    pub fn quantity_dirty(&self) -> Int {
        let cells = Float::from(self.width) * Float::from(self.height);
        (self.dirt_percentage * cells / 100.0).floor() as Int
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(10, 10, 5, 50.0, 1000, 42)
    }
}

/// Final figures of a run, also available before termination via `CleaningModel::report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub robots: Int,
    pub elapsed_steps: Int,

    /// Clean cells as a percentage of all cells, rounded to two decimals.
    pub clean_percentage: Float,

    /// Moves per robot, in scheduling order.
    pub moves_per_robot: Vec<Moves>,
    pub total_moves: Moves,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} cleaning robots finished after {} steps with {:.2}% of cells clean; \
             moves per robot {:?}, {} moves in total",
            self.robots,
            self.elapsed_steps,
            self.clean_percentage,
            self.moves_per_robot,
            self.total_moves
        )
    }
}

/// Rounds to two decimal places, ties to even.
fn round2(value: Float) -> Float {
    (value * 100.0).round_ties_even() / 100.0
}

/// Sum of all moves, saturating instead of overflowing.
fn total_moves(moves_per_robot: &[Moves]) -> Moves {
    moves_per_robot
        .iter()
        .fold(0, |total: Moves, &moves| total.saturating_add(moves))
}

/// Cleaning robots wandering a grid until every cell is clean or the step budget runs out.
///
/// Drive it with `step()` and read it through the observers; it never runs on its own.
#[derive(Debug, Clone)]
pub struct CleaningModel {
    world: World,
    schedule: SimultaneousActivation,
    quantity_dirty: Int,
    max_steps: Int,
    running: bool,
    summary: Option<RunSummary>,
}

impl CleaningModel {
    /// Builds a model: dirt first, on distinct random cells, then every robot on (0, 0).
    pub fn new(
        width: Int,
        height: Int,
        robots: Int,
        dirt_percentage: Float,
        max_steps: Int,
        rng: Rng,
    ) -> Result<Self, CleaningError> {
        let config = ModelConfig {
            width,
            height,
            robots,
            dirt_percentage,
            max_steps,
            seed: 0,
        };
        let total = config.validate()?;
        let quantity_dirty = config.quantity_dirty();
        if quantity_dirty > total {
            return Err(CleaningError::PlacementExhausted {
                requested: quantity_dirty,
                placed: 0,
                total,
            });
        }

        let mut world = World::new(width, height, quantity_dirty, rng);
        world.place_dirt(quantity_dirty)?;

        let mut schedule = SimultaneousActivation::new();
        for id in world.place_robots(robots) {
            schedule.add(id);
        }

        debug!(
            width,
            height,
            robots,
            quantity_dirty,
            max_steps,
            "built cleaning model"
        );
        Ok(Self {
            world,
            schedule,
            quantity_dirty,
            max_steps,
            running: true,
            summary: None,
        })
    }

    /// Builds a model with a `Pcg64` seeded from `config.seed`.
    pub fn from_config(config: &ModelConfig) -> Result<Self, CleaningError> {
        Self::new(
            config.width,
            config.height,
            config.robots,
            config.dirt_percentage,
            config.max_steps,
            rand_pcg::Pcg64::seed_from_u64(config.seed),
        )
    }

    /// Advances by one scheduler pass, or terminates when the budget is spent or every cell is
    /// clean. Termination is checked before acting, so it takes one extra call to notice that the
    /// last pass finished the job. Once terminated, further calls change nothing.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        if self.elapsed_steps() < self.max_steps && self.world.clean() != self.total_cells() {
            let world = &mut self.world;
            self.schedule.step(|id| world.activate_robot(id));
            debug!(
                step = self.elapsed_steps(),
                clean = self.world.clean(),
                "scheduler pass complete"
            );
        } else {
            self.running = false;
            let summary = self.report();
            info!(
                robots = summary.robots,
                elapsed_steps = summary.elapsed_steps,
                clean_percentage = summary.clean_percentage,
                total_moves = summary.total_moves,
                "simulation terminated"
            );
            self.summary = Some(summary);
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn cells_cleaned(&self) -> Int {
        self.world.clean()
    }

    pub fn total_cells(&self) -> Int {
        self.world.grid().total_cells()
    }

    /// Scheduler passes run so far.
    pub fn elapsed_steps(&self) -> Int {
        self.schedule.passes()
    }

    pub fn robot_count(&self) -> Int {
        self.schedule.len() as Int
    }

    /// Dirt markers placed at construction.
    pub fn quantity_dirty(&self) -> Int {
        self.quantity_dirty
    }

    pub fn width(&self) -> Int {
        self.world.grid().width()
    }

    pub fn height(&self) -> Int {
        self.world.grid().height()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Everything at (x, y) in arrival order. Empty for coordinates outside the grid.
    pub fn cell_contents(&self, x: Int, y: Int) -> Vec<OccupantDescriptor> {
        self.world
            .grid()
            .cell_contents(Coordinate::new(x, y))
            .iter()
            .filter_map(|&id| self.world.agent(id))
            .map(|agent| agent.describe())
            .collect()
    }

    /// Moves made by each robot, in scheduling order.
    pub fn per_robot_steps_moved(&self) -> Vec<Moves> {
        self.schedule
            .agents()
            .iter()
            .filter_map(|&id| self.world.agent(id))
            .filter_map(|agent| agent.steps_moved())
            .collect()
    }

    pub fn clean_percentage(&self) -> Float {
        round2(Float::from(self.cells_cleaned()) * 100.0 / Float::from(self.total_cells()))
    }

    /// The figures reported at termination, computed from the current state.
    pub fn report(&self) -> RunSummary {
        let moves_per_robot = self.per_robot_steps_moved();
        RunSummary {
            robots: self.robot_count(),
            elapsed_steps: self.elapsed_steps(),
            clean_percentage: self.clean_percentage(),
            total_moves: total_moves(&moves_per_robot),
            moves_per_robot,
        }
    }

    /// The summary recorded when the model terminated, if it has.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }
}

impl Model for CleaningModel {
    fn step(&mut self) {
        CleaningModel::step(self)
    }

    fn running(&self) -> bool {
        self.running
    }
}

// One character per cell: R if any robot is there, * for uncleaned dirt, . otherwise. Column
// numbers (last digit only) on top, row numbers on the left, row 0 first.
impl std::fmt::Display for CleaningModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.width();
        let height = self.height();
        let label_width = (height - 1).to_string().len();

        let mut s = String::new();
        s.push_str(&" ".repeat(label_width + 1));
        for col in 0..width {
            s.push_str(&format!("{}", col % 10));
            if col < width - 1 {
                s.push(' ');
            }
        }
        s.push('\n');

        for row in 0..height {
            s.push_str(&format!("{:>label_width$} ", row));
            for col in 0..width {
                let contents = self.cell_contents(col, row);
                let c = if contents.iter().any(|o| o.state == AgentState::Robot) {
                    'R'
                } else if contents.iter().any(|o| o.state == AgentState::Dirty) {
                    '*'
                } else {
                    '.'
                };
                s.push(c);
                if col < width - 1 {
                    s.push(' ');
                }
            }
            if row < height - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}
