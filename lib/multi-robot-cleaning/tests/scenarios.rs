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

use approx::assert_abs_diff_eq;
use multi_robot_cleaning::{AgentState, CleaningError, CleaningModel, ModelConfig, Simulation};
use rand::SeedableRng;

fn run_to_end(config: &ModelConfig) -> CleaningModel {
    let model = CleaningModel::from_config(config).expect("valid config");
    let mut simulation = Simulation::new(model);
    simulation.run();
    simulation.into_model()
}

#[test]
fn test_already_clean_grid_reports_immediately() {
    let mut model = CleaningModel::new(
        5,   /*width*/
        5,   /*height*/
        1,   /*robots*/
        0.0, /*dirt_percentage*/
        10,  /*max_steps*/
        rand_pcg::Pcg64::seed_from_u64(42),
    )
    .expect("valid config");

    model.step();

    assert!(!model.running());
    assert_eq!(model.elapsed_steps(), 0);
    assert_eq!(model.cells_cleaned(), 25);
    assert_eq!(model.per_robot_steps_moved(), vec![0]);
    let summary = model.summary().expect("summary recorded");
    assert_abs_diff_eq!(summary.clean_percentage, 100.0, epsilon = 1e-9);
    assert_eq!(summary.total_moves, 0);
}

#[test]
fn test_single_cell_grid_is_rejected() {
    let result = CleaningModel::from_config(&ModelConfig::new(1, 1, 1, 50.0, 10, 42));
    assert!(matches!(
        result,
        Err(CleaningError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_fully_dirty_grid_runs_to_completion() {
    let model = run_to_end(&ModelConfig::new(10, 10, 5, 100.0, 1000, 42));

    assert!(!model.running());
    assert!(model.cells_cleaned() == 100 || model.elapsed_steps() == 1000);
    let moves = model.per_robot_steps_moved();
    assert_eq!(moves.len(), 5);
    assert!(moves.iter().sum::<i64>() > 0);

    let summary = model.summary().expect("summary recorded");
    assert_eq!(summary.moves_per_robot, moves);
    assert_eq!(summary.total_moves, moves.iter().sum::<i64>());
    assert_eq!(summary.elapsed_steps, model.elapsed_steps());
}

#[test]
fn test_cleaned_dirt_stays_on_the_grid() {
    let model = run_to_end(&ModelConfig::new(6, 6, 3, 50.0, 2000, 7));

    let agents = model.world().agents();
    let dirt = agents
        .iter()
        .filter(|agent| agent.state() != AgentState::Robot)
        .count();
    assert_eq!(dirt as i32, model.quantity_dirty());

    let cleaned = agents
        .iter()
        .filter(|agent| agent.state() == AgentState::Cleaned)
        .count() as i32;
    assert_eq!(
        model.cells_cleaned(),
        model.total_cells() - model.quantity_dirty() + cleaned
    );
}

#[test]
fn test_equal_seeds_give_identical_runs() {
    let config = ModelConfig::new(12, 9, 4, 35.0, 300, 1234);
    let first = run_to_end(&config);
    let second = run_to_end(&config);

    assert_eq!(first.summary(), second.summary());
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_simulation_takes_one_extra_call_to_notice_termination() {
    let model = CleaningModel::from_config(&ModelConfig::new(8, 8, 2, 25.0, 40, 99))
        .expect("valid config");
    let mut simulation = Simulation::new(model);
    let calls = simulation.run();
    assert_eq!(calls, simulation.model().elapsed_steps() + 1);
}

#[test]
fn test_narrow_corridor_is_supported() {
    let model = run_to_end(&ModelConfig::new(1, 6, 2, 50.0, 500, 3));
    assert!(!model.running());
    assert!(model.world().occupancy_is_consistent());
    for agent in model.world().agents() {
        assert_eq!(agent.position().x, 0);
    }
}
