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

use multi_robot_cleaning::{
    CleaningError, CleaningModel, Float, Int, ModelConfig, RunSummary, Simulation,
};
use rayon::prelude::*;
use serde::Serialize;

/// Averages over every run that used the same number of robots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub robots: Int,
    pub runs: usize,
    pub mean_elapsed_steps: Float,
    pub mean_clean_percentage: Float,
    pub mean_total_moves: Float,
}

impl SweepRow {
    fn from_runs(robots: Int, runs: &[RunSummary]) -> Self {
        let mean = |value: fn(&RunSummary) -> Float| {
            if runs.is_empty() {
                0.0
            } else {
                runs.iter().map(value).sum::<Float>() / runs.len() as Float
            }
        };
        Self {
            robots,
            runs: runs.len(),
            mean_elapsed_steps: mean(|s| Float::from(s.elapsed_steps)),
            mean_clean_percentage: mean(|s| s.clean_percentage),
            mean_total_moves: mean(|s| s.total_moves as Float),
        }
    }
}

/// Runs one model to termination.
pub fn run_once(config: &ModelConfig) -> Result<RunSummary, CleaningError> {
    let model = CleaningModel::from_config(config)?;
    let mut simulation = Simulation::new(model);
    simulation.run();
    Ok(simulation.model().report())
}

/// Runs `repeats` models for every robot count, in parallel. Repeat `r` uses seed
/// `base.seed + r`, so every robot count sees the same sequence of seeds.
pub fn sweep(
    base: &ModelConfig,
    robot_counts: &[Int],
    repeats: usize,
) -> Result<Vec<SweepRow>, CleaningError> {
    if repeats == 0 {
        return Ok(Vec::new());
    }
    let jobs: Vec<ModelConfig> = robot_counts
        .iter()
        .flat_map(|&robots| {
            (0..repeats as u64).map(move |r| ModelConfig {
                robots,
                seed: base.seed.wrapping_add(r),
                ..base.clone()
            })
        })
        .collect();

    let summaries: Vec<RunSummary> = jobs.par_iter().map(run_once).collect::<Result<_, _>>()?;

    Ok(robot_counts
        .iter()
        .zip(summaries.chunks(repeats))
        .map(|(&robots, runs)| SweepRow::from_runs(robots, runs))
        .collect())
}
