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
use clap::{value_parser, Arg, Command};
use mail_robot::robots::RobotKind;
use mail_robot::{Memory, Simulation, SimulationConfig};
use mail_robot_logic::village::{village_graph, POST_OFFICE};
use mail_robot_logic::{Location, VillageState};
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Chapter 7 Project: A Robot. Run one robot on one random task and show every move it makes.
fn cli() -> Command {
    Command::new("ch07-run-robot-once")
        .about("Run a mail robot on a single random delivery task")
        .arg(
            Arg::new("robot")
                .long("robot")
                .default_value("goal-oriented")
                .value_parser(value_parser!(RobotKind))
                .help("Robot: random, route, goal-oriented or nearest-parcel"),
        )
        .arg(
            Arg::new("parcels")
                .long("parcels")
                .default_value("5")
                .value_parser(value_parser!(usize))
                .help("Parcels to deliver"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("42")
                .value_parser(value_parser!(u64))
                .help("Random seed for reproducibility"),
        )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let matches = cli().get_matches();
    let kind = *matches
        .get_one::<RobotKind>("robot")
        .context("missing --robot")?;
    let parcels = *matches
        .get_one::<usize>("parcels")
        .context("missing --parcels")?;
    let seed = *matches.get_one::<u64>("seed").context("missing --seed")?;

    let graph = village_graph()?;
    let robot = kind.build(&graph)?;
    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
    let state = VillageState::random(&graph, parcels, &Location::from(POST_OFFICE), &mut rng)?;
    for parcel in state.parcels() {
        info!(place = %parcel.place, address = %parcel.address, "parcel");
    }

    let trace = Simulation::new(&graph, robot.as_ref(), SimulationConfig::default())
        .run_traced(&state, Memory::Empty, &mut rng)?;
    for direction in &trace.path {
        println!("Moved to {}", direction);
    }
    println!("Done in {} turns", trace.turns);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let matches = cli().get_matches_from(["ch07-run-robot-once"]);
        assert_eq!(
            matches.get_one::<RobotKind>("robot"),
            Some(&RobotKind::GoalOriented)
        );
        assert_eq!(matches.get_one::<usize>("parcels"), Some(&5));
        assert_eq!(matches.get_one::<u64>("seed"), Some(&42));
    }

    #[test]
    fn test_overrides() {
        let matches = cli().get_matches_from([
            "ch07-run-robot-once",
            "--robot",
            "random",
            "--parcels",
            "0",
            "--seed",
            "7",
        ]);
        assert_eq!(matches.get_one::<RobotKind>("robot"), Some(&RobotKind::Random));
        assert_eq!(matches.get_one::<usize>("parcels"), Some(&0));
        assert_eq!(matches.get_one::<u64>("seed"), Some(&7));
    }

    #[test]
    fn test_rejects_unknown_robot() {
        let result = cli().try_get_matches_from(["ch07-run-robot-once", "--robot", "teleporting"]);
        assert!(result.is_err());
    }
}
