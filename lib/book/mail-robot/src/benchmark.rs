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

// Head-to-head comparison of two robots on the same random tasks.

use mail_robot_logic::village::POST_OFFICE;
use mail_robot_logic::{Location, MailRobotError, RoadGraph, VillageState};
use rand::{Rng as _, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::{Memory, Rng, Robot, Simulation, SimulationConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub parcel_count: usize,
    pub task_count: usize,
    pub start: Location,
    pub simulation: SimulationConfig,

    /// Run tasks on the rayon thread pool. The report is the same either way.
    pub parallel: bool,
}

impl BenchmarkConfig {
    fn new(
        parcel_count: usize,
        task_count: usize,
        start: Location,
        simulation: SimulationConfig,
        parallel: bool,
    ) -> Self {
        Self {
            parcel_count,
            task_count,
            start,
            simulation,
            parallel,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(
            5,
            100,
            Location::from(POST_OFFICE),
            SimulationConfig::default(),
            false,
        )
    }
}

/// A robot entered into a comparison, with the memory it starts each task with.
pub struct Contender<'a> {
    pub robot: &'a dyn Robot,
    pub memory: Memory,
}

impl<'a> Contender<'a> {
    pub fn new(robot: &'a dyn Robot, memory: Memory) -> Self {
        Self { robot, memory }
    }
}

/// One task: the starting state, and the seed each robot's rng gets for this task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub state: VillageState,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotScore {
    pub name: String,

    /// Turns taken on each task, in task order.
    pub turns: Vec<usize>,
    pub mean: f64,

    /// Mean rounded to the nearest whole turn, halves rounding up.
    pub average: u64,
}

impl RobotScore {
    fn new(name: &str, turns: Vec<usize>) -> Self {
        let total: usize = turns.iter().sum();
        let mean = total as f64 / turns.len() as f64;
        Self {
            name: name.to_string(),
            turns,
            mean,
            average: mean.round() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub parcel_count: usize,
    pub task_count: usize,
    pub first: RobotScore,
    pub second: RobotScore,
}

/// Generate `config.task_count` random tasks.
pub fn generate_tasks(
    graph: &RoadGraph,
    config: &BenchmarkConfig,
    rng: &mut Rng,
) -> Result<Vec<Task>, MailRobotError> {
    (0..config.task_count)
        .map(|_| -> Result<Task, MailRobotError> {
            let state = VillageState::random(graph, config.parcel_count, &config.start, rng)?;
            Ok(Task {
                state,
                seed: rng.gen(),
            })
        })
        .collect()
}

/// Compare two robots on `config.task_count` random tasks drawn from `rng`. Both robots get the
/// exact same tasks.
///
/// If any run fails the whole comparison fails with that error; tasks are not skipped.
pub fn compare_robots(
    graph: &RoadGraph,
    first: &Contender,
    second: &Contender,
    config: &BenchmarkConfig,
    rng: &mut Rng,
) -> Result<BenchmarkReport, MailRobotError> {
    if config.task_count == 0 {
        return Err(MailRobotError::NoTasks);
    }
    let tasks = generate_tasks(graph, config, rng)?;
    let report = compare_on_tasks(graph, first, second, &tasks, config)?;
    info!(
        parcels = report.parcel_count,
        tasks = report.task_count,
        first = %report.first.name,
        first_average = report.first.average,
        second = %report.second.name,
        second_average = report.second.average,
        "benchmark finished"
    );
    Ok(report)
}

/// Compare two robots on the given tasks.
pub fn compare_on_tasks(
    graph: &RoadGraph,
    first: &Contender,
    second: &Contender,
    tasks: &[Task],
    config: &BenchmarkConfig,
) -> Result<BenchmarkReport, MailRobotError> {
    if tasks.is_empty() {
        return Err(MailRobotError::NoTasks);
    }

    // Every run gets a fresh rng from the task seed, so the order runs happen in does not matter.
    let run_task = |task: &Task| -> Result<(usize, usize), MailRobotError> {
        let run = |contender: &Contender| {
            let mut rng = Rng::seed_from_u64(task.seed);
            Simulation::new(graph, contender.robot, config.simulation).run(
                &task.state,
                contender.memory.clone(),
                &mut rng,
            )
        };
        Ok((run(first)?, run(second)?))
    };

    // Parallel runs finish in any order; keep them in task order so the error reported is the
    // one from the earliest failing task, same as the sequential path.
    let results: Vec<(usize, usize)> = if config.parallel {
        tasks
            .par_iter()
            .map(run_task)
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<_, _>>()?
    } else {
        tasks.iter().map(run_task).collect::<Result<_, _>>()?
    };
    let (first_turns, second_turns): (Vec<usize>, Vec<usize>) = results.into_iter().unzip();

    Ok(BenchmarkReport {
        parcel_count: config.parcel_count,
        task_count: tasks.len(),
        first: RobotScore::new(first.robot.name(), first_turns),
        second: RobotScore::new(second.robot.name(), second_turns),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use mail_robot_logic::village::village_graph;
    use mail_robot_logic::Parcel;

    use super::*;
    use crate::robots::{GoalOrientedRobot, NearestParcelRobot, RandomRobot, RouteRobot};

    fn loc(name: &str) -> Location {
        Location::from(name)
    }

    #[test]
    fn test_nearest_parcel_beats_goal_oriented() {
        let graph = village_graph().unwrap();
        let nearest = NearestParcelRobot::new();
        let goal = GoalOrientedRobot::new();
        let mut rng = Rng::seed_from_u64(42);

        let report = compare_robots(
            &graph,
            &Contender::new(&nearest, Memory::Empty),
            &Contender::new(&goal, Memory::Empty),
            &BenchmarkConfig::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(report.task_count, 100);
        assert_eq!(report.first.turns.len(), 100);
        assert_eq!(report.first.name, "nearest-parcel");
        assert_eq!(report.second.name, "goal-oriented");
        assert!(
            report.first.average <= report.second.average + 1,
            "nearest: {}, goal: {}",
            report.first.mean,
            report.second.mean
        );
    }

    #[test]
    fn test_planners_beat_random() {
        let graph = village_graph().unwrap();
        let random = RandomRobot::new();
        let goal = GoalOrientedRobot::new();
        let mut rng = Rng::seed_from_u64(1);

        let report = compare_robots(
            &graph,
            &Contender::new(&random, Memory::Empty),
            &Contender::new(&goal, Memory::Empty),
            &BenchmarkConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert!(report.second.mean < report.first.mean);
    }

    #[test]
    fn test_same_seed_same_report() {
        let graph = village_graph().unwrap();
        let random = RandomRobot::new();
        let route = RouteRobot::mail_route(&graph).unwrap();
        let first = Contender::new(&random, Memory::Empty);
        let second = Contender::new(&route, Memory::Empty);
        let config = BenchmarkConfig {
            task_count: 30,
            ..Default::default()
        };

        let one = compare_robots(&graph, &first, &second, &config, &mut Rng::seed_from_u64(9));
        let two = compare_robots(&graph, &first, &second, &config, &mut Rng::seed_from_u64(9));
        assert_eq!(one.unwrap(), two.unwrap());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = village_graph().unwrap();
        let random = RandomRobot::new();
        let nearest = NearestParcelRobot::new();
        let first = Contender::new(&random, Memory::Empty);
        let second = Contender::new(&nearest, Memory::Empty);
        let sequential = BenchmarkConfig::default();
        let parallel = BenchmarkConfig {
            parallel: true,
            ..Default::default()
        };

        let one = compare_robots(&graph, &first, &second, &sequential, &mut Rng::seed_from_u64(5));
        let two = compare_robots(&graph, &first, &second, &parallel, &mut Rng::seed_from_u64(5));
        assert_eq!(one.unwrap(), two.unwrap());
    }

    #[test]
    fn test_both_robots_see_the_same_tasks() {
        let graph = village_graph().unwrap();
        let goal = GoalOrientedRobot::new();
        let report = compare_robots(
            &graph,
            &Contender::new(&goal, Memory::Empty),
            &Contender::new(&goal, Memory::Empty),
            &BenchmarkConfig::default(),
            &mut Rng::seed_from_u64(11),
        )
        .unwrap();
        assert_eq!(report.first.turns, report.second.turns);
    }

    #[test]
    fn test_score_mean_and_rounding() {
        let score = RobotScore::new("robot", vec![10, 11]);
        assert_abs_diff_eq!(score.mean, 10.5, epsilon = 1e-9);
        assert_eq!(score.average, 11);

        let score = RobotScore::new("robot", vec![10, 10, 11]);
        assert_abs_diff_eq!(score.mean, 10.333, epsilon = 0.001);
        assert_eq!(score.average, 10);
    }

    #[test]
    fn test_no_tasks_is_an_error() {
        let graph = village_graph().unwrap();
        let goal = GoalOrientedRobot::new();
        let contender = Contender::new(&goal, Memory::Empty);
        let config = BenchmarkConfig {
            task_count: 0,
            ..Default::default()
        };
        assert_eq!(
            compare_robots(
                &graph,
                &contender,
                &contender,
                &config,
                &mut Rng::seed_from_u64(1)
            ),
            Err(MailRobotError::NoTasks)
        );
        assert_eq!(
            compare_on_tasks(&graph, &contender, &contender, &[], &config),
            Err(MailRobotError::NoTasks)
        );
    }

    #[test]
    fn test_unreachable_parcel_aborts_benchmark() {
        let graph = RoadGraph::from_edges(["A-B", "C-D"]).unwrap();
        let reachable = VillageState::new(&graph, loc("A"), vec![Parcel::new("B", "A")]).unwrap();
        let unreachable =
            VillageState::new(&graph, loc("A"), vec![Parcel::new("C", "D")]).unwrap();
        let tasks = [
            Task {
                state: reachable,
                seed: 1,
            },
            Task {
                state: unreachable,
                seed: 2,
            },
        ];
        let goal = GoalOrientedRobot::new();
        let nearest = NearestParcelRobot::new();
        let config = BenchmarkConfig {
            start: loc("A"),
            ..Default::default()
        };

        for parallel in [false, true] {
            let config = BenchmarkConfig {
                parallel,
                ..config.clone()
            };
            assert_eq!(
                compare_on_tasks(
                    &graph,
                    &Contender::new(&goal, Memory::Empty),
                    &Contender::new(&nearest, Memory::Empty),
                    &tasks,
                    &config,
                ),
                Err(MailRobotError::NoRoute {
                    from: loc("A"),
                    to: loc("C"),
                })
            );
        }
    }

    #[test]
    fn test_earliest_failing_task_is_reported() {
        let graph = RoadGraph::from_edges(["A-B", "C-D", "E-F"]).unwrap();
        let unreachable = |address: &str| {
            VillageState::new(&graph, loc("A"), vec![Parcel::new(address, "A")]).unwrap()
        };
        // Many failing tasks so rayon is likely to hit a later one first.
        let tasks: Vec<Task> = (0..64)
            .map(|seed| Task {
                state: unreachable(if seed == 0 { "C" } else { "E" }),
                seed,
            })
            .collect();
        let goal = GoalOrientedRobot::new();
        let nearest = NearestParcelRobot::new();

        for parallel in [false, true] {
            let config = BenchmarkConfig {
                start: loc("A"),
                parallel,
                ..Default::default()
            };
            assert_eq!(
                compare_on_tasks(
                    &graph,
                    &Contender::new(&goal, Memory::Empty),
                    &Contender::new(&nearest, Memory::Empty),
                    &tasks,
                    &config,
                ),
                Err(MailRobotError::NoRoute {
                    from: loc("A"),
                    to: loc("C"),
                })
            );
        }
    }

    #[test]
    fn test_generate_tasks() {
        let graph = village_graph().unwrap();
        let config = BenchmarkConfig {
            parcel_count: 3,
            task_count: 10,
            ..Default::default()
        };
        let tasks = generate_tasks(&graph, &config, &mut Rng::seed_from_u64(2)).unwrap();
        assert_eq!(tasks.len(), 10);
        for task in &tasks {
            assert_eq!(task.state.parcels().len(), 3);
            assert_eq!(task.state.place(), &loc(POST_OFFICE));
        }
    }
}
