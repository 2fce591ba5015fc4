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

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mail_robot::benchmark::{compare_robots, BenchmarkConfig, Contender};
use mail_robot::robots::RobotKind;
use mail_robot::{Memory, SimulationConfig};
use mail_robot_logic::village::village_graph;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Chapter 7 Project: A Robot, Exercise 1, Measuring a robot.
//
// Give two robots, each with its starting memory, the same batch of random tasks and report the
// average number of moves each needed per task. Both robots must see every task.
fn cli() -> Command {
    Command::new("ch07-compare-robots")
        .about("Compare two mail robots on the same random delivery tasks")
        .arg(
            Arg::new("first")
                .long("first")
                .default_value("nearest-parcel")
                .value_parser(value_parser!(RobotKind))
                .help("First robot: random, route, goal-oriented or nearest-parcel"),
        )
        .arg(
            Arg::new("second")
                .long("second")
                .default_value("goal-oriented")
                .value_parser(value_parser!(RobotKind))
                .help("Second robot"),
        )
        .arg(
            Arg::new("parcels")
                .long("parcels")
                .default_value("5")
                .value_parser(value_parser!(usize))
                .help("Parcels per task"),
        )
        .arg(
            Arg::new("tasks")
                .long("tasks")
                .default_value("100")
                .value_parser(value_parser!(usize))
                .help("Number of tasks"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("42")
                .value_parser(value_parser!(u64))
                .help("Random seed for reproducibility"),
        )
        .arg(
            Arg::new("turn-limit")
                .long("turn-limit")
                .default_value("10000")
                .value_parser(value_parser!(usize))
                .help("Give up on a task after this many turns"),
        )
        .arg(
            Arg::new("no-turn-limit")
                .long("no-turn-limit")
                .action(ArgAction::SetTrue)
                .help("Run every task to completion, however long it takes"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Run tasks in parallel"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output the full report as JSON"),
        )
}

fn benchmark_config(matches: &ArgMatches) -> anyhow::Result<BenchmarkConfig> {
    let turn_limit = if matches.get_flag("no-turn-limit") {
        None
    } else {
        Some(
            *matches
                .get_one::<usize>("turn-limit")
                .context("missing --turn-limit")?,
        )
    };
    Ok(BenchmarkConfig {
        parcel_count: *matches
            .get_one::<usize>("parcels")
            .context("missing --parcels")?,
        task_count: *matches.get_one::<usize>("tasks").context("missing --tasks")?,
        simulation: SimulationConfig { turn_limit },
        parallel: matches.get_flag("parallel"),
        ..Default::default()
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let matches = cli().get_matches();
    let first = *matches
        .get_one::<RobotKind>("first")
        .context("missing --first")?;
    let second = *matches
        .get_one::<RobotKind>("second")
        .context("missing --second")?;
    let seed = *matches.get_one::<u64>("seed").context("missing --seed")?;
    let config = benchmark_config(&matches)?;
    info!(%first, %second, seed, ?config, "starting");

    let graph = village_graph()?;
    let first_robot = first.build(&graph)?;
    let second_robot = second.build(&graph)?;
    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);

    let report = compare_robots(
        &graph,
        &Contender::new(first_robot.as_ref(), Memory::Empty),
        &Contender::new(second_robot.as_ref(), Memory::Empty),
        &config,
        &mut rng,
    )?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (ordinal, score) in [("first", &report.first), ("second", &report.second)] {
            println!(
                "The {} robot ({}) takes an average of {} moves to deliver {} parcels.",
                ordinal, score.name, score.average, report.parcel_count
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let matches = cli().get_matches_from(["ch07-compare-robots"]);
        let config = benchmark_config(&matches).unwrap();
        assert_eq!(config, BenchmarkConfig::default());
        assert_eq!(
            matches.get_one::<RobotKind>("first"),
            Some(&RobotKind::NearestParcel)
        );
    }

    #[test]
    fn test_no_turn_limit() {
        let matches = cli().get_matches_from([
            "ch07-compare-robots",
            "--no-turn-limit",
            "--parallel",
            "--tasks",
            "10",
        ]);
        let config = benchmark_config(&matches).unwrap();
        assert_eq!(config.simulation.turn_limit, None);
        assert!(config.parallel);
        assert_eq!(config.task_count, 10);
    }

    #[test]
    fn test_rejects_unknown_robot() {
        let result = cli().try_get_matches_from(["ch07-compare-robots", "--first", "teleporting"]);
        assert!(result.is_err());
    }
}
