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

// Mail delivery robots.
//
// A robot walks the village roads picking up parcels and dropping them off. The robot sees the
// village state and its own memory, and answers with a direction and a new memory. It never
// touches the state itself; the Simulation applies the move.

use std::collections::VecDeque;

use mail_robot_logic::{Location, MailRobotError, RoadGraph, VillageState};
use tracing::{debug, trace};

pub mod benchmark;
pub mod robots;

pub type Rng = rand_pcg::Pcg64;

/// Memory a robot carries from one turn to the next. The Simulation hands it back to the robot
/// unchanged on the next turn, so a robot has no state other than this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Memory {
    /// Nothing remembered, or everything remembered has been used up.
    #[default]
    Empty,

    /// The rest of a route planned towards a parcel or an address.
    Route(VecDeque<Location>),

    /// The rest of a fixed list of directions.
    Directions(VecDeque<Location>),
}

/// What a robot decided to do this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Location,
    pub memory: Memory,
}

/// A Robot decides where to go next given the village state and its memory.
///
/// Notice that the Robot is not given a way to change the state. Any randomness must come from
/// `rng` so that runs can be repeated from a seed.
pub trait Robot: Sync {
    fn name(&self) -> &'static str;

    fn decide(
        &self,
        graph: &RoadGraph,
        state: &VillageState,
        memory: Memory,
        rng: &mut Rng,
    ) -> Result<Decision, MailRobotError>;
}

pub const DEFAULT_TURN_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Give up with `SimulationDiverged` after this many turns. `None` runs until every parcel
    /// is delivered, however long that takes.
    pub turn_limit: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            turn_limit: Some(DEFAULT_TURN_LIMIT),
        }
    }
}

/// Result of a traced run: how many turns it took and every direction the robot chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationTrace {
    pub turns: usize,
    pub path: Vec<Location>,
}

/// A Simulation runs a single Robot on a village state until every parcel is delivered, counting
/// the turns it takes.
///
/// The Simulation is aware of both the road graph and the Robot. The Robot still only sees the
/// state and its memory.
pub struct Simulation<'a, _Robot>
where
    _Robot: Robot + ?Sized,
{
    graph: &'a RoadGraph,
    robot: &'a _Robot,
    config: SimulationConfig,
}

impl<'a, _Robot> Simulation<'a, _Robot>
where
    _Robot: Robot + ?Sized,
{
    pub fn new(graph: &'a RoadGraph, robot: &'a _Robot, config: SimulationConfig) -> Self {
        Self {
            graph,
            robot,
            config,
        }
    }

    /// Run the robot from `state` and return the number of turns until all parcels are
    /// delivered. A state with no parcels takes zero turns.
    pub fn run(
        &self,
        state: &VillageState,
        memory: Memory,
        rng: &mut Rng,
    ) -> Result<usize, MailRobotError> {
        self.simulate(state, memory, rng, None)
    }

    /// Like `run`, but also records every direction the robot chose.
    pub fn run_traced(
        &self,
        state: &VillageState,
        memory: Memory,
        rng: &mut Rng,
    ) -> Result<SimulationTrace, MailRobotError> {
        let mut path = Vec::new();
        let turns = self.simulate(state, memory, rng, Some(&mut path))?;
        Ok(SimulationTrace { turns, path })
    }

    fn simulate(
        &self,
        state: &VillageState,
        memory: Memory,
        rng: &mut Rng,
        mut path: Option<&mut Vec<Location>>,
    ) -> Result<usize, MailRobotError> {
        let mut state = state.clone();
        let mut memory = memory;
        let mut turns = 0;
        loop {
            if state.is_done() {
                debug!(robot = self.robot.name(), turns, "all parcels delivered");
                return Ok(turns);
            }
            if let Some(turn_limit) = self.config.turn_limit {
                if turns >= turn_limit {
                    return Err(MailRobotError::SimulationDiverged { turns });
                }
            }

            let Decision {
                direction,
                memory: next_memory,
            } = self.robot.decide(self.graph, &state, memory, rng)?;
            trace!(
                robot = self.robot.name(),
                turn = turns,
                from = %state.place(),
                to = %direction,
                "moved"
            );
            state = state.move_to(self.graph, &direction);
            if let Some(path) = path.as_deref_mut() {
                path.push(direction);
            }
            memory = next_memory;
            turns += 1;
        }
    }
}
