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

//! Command-line harness for the multi-robot cleaning simulation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use multi_robot_cleaning::{CleaningModel, Float, Int, ModelConfig};
use tracing::info;

mod sweep;

#[derive(Debug, Parser)]
#[command(name = "cleaning-simulation", about = "Cleaning robots on a grid")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single simulation until it terminates.
    Run(RunArgs),

    /// Run many simulations per robot count and report averages.
    Sweep(SweepArgs),
}

/// Model parameters. Flags override values read from `--config`.
#[derive(Debug, Args)]
struct ModelArgs {
    /// JSON file holding a model configuration. Missing keys take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<Int>,

    #[arg(long)]
    height: Option<Int>,

    #[arg(long)]
    robots: Option<Int>,

    #[arg(long)]
    dirt_percentage: Option<Float>,

    #[arg(long)]
    max_steps: Option<Int>,

    #[arg(long)]
    seed: Option<u64>,
}

impl ModelArgs {
    fn resolve(&self) -> Result<ModelConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => ModelConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(robots) = self.robots {
            config.robots = robots;
        }
        if let Some(dirt_percentage) = self.dirt_percentage {
            config.dirt_percentage = dirt_percentage;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct RunArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Print the grid every N steps, and once more at the end.
    #[arg(long)]
    render_every: Option<Int>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct SweepArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Robot counts to compare, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
    robot_counts: Vec<Int>,

    /// Runs per robot count, each with its own seed.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    repeats: u32,

    /// Print the rows as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Sweep(args) => run_sweep(args),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<()> {
    let config = args.model.resolve()?;
    info!(?config, "starting run");
    let mut model = CleaningModel::from_config(&config).context("building model")?;

    while model.running() {
        if let Some(every) = args.render_every.filter(|&every| every > 0) {
            if model.elapsed_steps() % every == 0 {
                println!("step {}\n{}\n", model.elapsed_steps(), model);
            }
        }
        model.step();
    }
    if args.render_every.is_some() {
        println!("final\n{}\n", model);
    }

    let summary = model.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let base = args.model.resolve()?;
    info!(
        ?base,
        robot_counts = ?args.robot_counts,
        repeats = args.repeats,
        "starting sweep"
    );
    let rows = sweep::sweep(&base, &args.robot_counts, args.repeats as usize)
        .context("running sweep")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!(
            "{:>6} {:>5} {:>12} {:>9} {:>12}",
            "robots", "runs", "mean steps", "clean %", "mean moves"
        );
        for row in &rows {
            println!(
                "{:>6} {:>5} {:>12.2} {:>9.2} {:>12.2}",
                row.robots,
                row.runs,
                row.mean_elapsed_steps,
                row.mean_clean_percentage,
                row.mean_total_moves
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "cleaning-simulation",
            "run",
            "--width",
            "7",
            "--robots",
            "3",
            "--seed",
            "9",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let config = args.model.resolve().expect("no config file involved");
        assert_eq!(
            config,
            ModelConfig {
                width: 7,
                robots: 3,
                seed: 9,
                ..ModelConfig::default()
            }
        );
    }

    #[test]
    fn test_run_parses_render_every() {
        let cli = Cli::parse_from(["cleaning-simulation", "run", "--render-every", "5", "--json"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.render_every, Some(5));
        assert!(args.json);
    }

    #[test]
    fn test_sweep_parses_robot_counts() {
        let cli = Cli::parse_from([
            "cleaning-simulation",
            "sweep",
            "--robot-counts",
            "1,5,9",
            "--repeats",
            "2",
        ]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep command");
        };
        assert_eq!(args.robot_counts, vec![1, 5, 9]);
        assert_eq!(args.repeats, 2);
    }

    #[test]
    fn test_zero_repeats_is_rejected() {
        let result = Cli::try_parse_from(["cleaning-simulation", "sweep", "--repeats", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::parse_from([
            "cleaning-simulation",
            "run",
            "--config",
            "/nonexistent/cleaning-config.json",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.model.resolve().is_err());
    }
}
