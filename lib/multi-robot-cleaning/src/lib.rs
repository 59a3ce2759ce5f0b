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

//! Cleaning robots on a grid.
//!
//! Dirt markers are scattered over a bounded grid and a team of robots starts in the corner. On
//! every step each robot cleans any dirt sharing its cell and wanders to a random neighboring
//! cell. A run ends once every cell is clean or the step budget is spent, and reports how far the
//! robots had to travel to get there.

pub mod agent;
pub mod error;
pub mod grid;
pub mod model;
pub mod schedule;
pub mod world;

pub use agent::{AgentId, AgentState, DirtState, Occupant, OccupantDescriptor};
pub use error::CleaningError;
pub use grid::{Coordinate, MultiGrid};
pub use model::{CleaningModel, ModelConfig, RunSummary};
pub use schedule::SimultaneousActivation;

pub type Int = i32;

/// Robot movement counters. Wider than `Int` since totals grow with robots times steps.
pub type Moves = i64;
pub type Float = f64;
pub type Rng = rand_pcg::Pcg64;
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A Model advances one step at a time and says when it is done.
///
/// Notice that a Model does not run itself. Whatever drives it (a `Simulation`, a renderer, a
/// batch harness) decides when to call `step`.
pub trait Model {
    fn step(&mut self);

    /// False once the model has terminated. Stepping a terminated model changes nothing.
    fn running(&self) -> bool;
}

/// A Simulation drives a single Model until it stops running.
pub struct Simulation<_Model>
where
    _Model: Model,
{
    model: _Model,
    calls: Int,
}

impl<_Model> Simulation<_Model>
where
    _Model: Model,
{
    pub fn new(model: _Model) -> Self {
        Self { model, calls: 0 }
    }

    /// Steps the model until it terminates and returns how many `step` calls that took,
    /// including the final one that noticed termination.
    pub fn run(&mut self) -> Int {
        while self.model.running() {
            self.model.step();
            self.calls += 1;
        }
        self.calls
    }

    pub fn model(&self) -> &_Model {
        &self.model
    }

    pub fn into_model(self) -> _Model {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown {
        left: Int,
    }

    impl Model for Countdown {
        fn step(&mut self) {
            if self.left > 0 {
                self.left -= 1;
            }
        }

        fn running(&self) -> bool {
            self.left > 0
        }
    }

    #[test]
    fn test_simulation_runs_until_model_stops() {
        let mut simulation = Simulation::new(Countdown { left: 3 });
        assert_eq!(simulation.run(), 3);
        assert!(!simulation.model().running());
    }

    #[test]
    fn test_simulation_of_stopped_model_does_nothing() {
        let mut simulation = Simulation::new(Countdown { left: 0 });
        assert_eq!(simulation.run(), 0);
        assert_eq!(simulation.into_model().left, 0);
    }
}
