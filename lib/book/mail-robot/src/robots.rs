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

use std::collections::VecDeque;
use std::str::FromStr;

use mail_robot_logic::village::mail_route;
use mail_robot_logic::{find_route, Location, MailRobotError, Parcel, RoadGraph, VillageState};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{Decision, Memory, Rng, Robot};

/// Take the first step of `route`, remembering the rest.
fn next_step(
    mut route: VecDeque<Location>,
    remember: fn(VecDeque<Location>) -> Memory,
) -> Result<Decision, MailRobotError> {
    let direction = route.pop_front().ok_or(MailRobotError::EmptyRoute)?;
    Ok(Decision {
        direction,
        memory: remember(route),
    })
}

/// Where to go for a parcel: pick it up if it is elsewhere, else deliver it.
fn waypoint<'a>(place: &Location, parcel: &'a Parcel) -> &'a Location {
    if parcel.place != *place {
        &parcel.place
    } else {
        &parcel.address
    }
}

fn pending_route(memory: Memory) -> VecDeque<Location> {
    match memory {
        Memory::Route(route) => route,
        _ => VecDeque::new(),
    }
}

/// Wanders to a random neighbor every turn.
#[derive(Debug, Default)]
pub struct RandomRobot {}

impl RandomRobot {
    pub fn new() -> Self {
        Self {}
    }
}

impl Robot for RandomRobot {
    fn name(&self) -> &'static str {
        RobotKind::Random.name()
    }

    fn decide(
        &self,
        graph: &RoadGraph,
        state: &VillageState,
        _memory: Memory,
        rng: &mut Rng,
    ) -> Result<Decision, MailRobotError> {
        // `from_edges` never builds a place without roads.
        let direction = graph
            .neighbors(state.place())?
            .choose(rng)
            .cloned()
            .ok_or_else(|| MailRobotError::DeadEnd(state.place().clone()))?;
        Ok(Decision {
            direction,
            memory: Memory::Empty,
        })
    }
}

/// Walks a fixed loop over and over, ignoring where the parcels are. With the village mail
/// route every parcel is delivered within two laps.
#[derive(Debug)]
pub struct RouteRobot {
    route: Vec<Location>,
}

impl RouteRobot {
    pub fn new(graph: &RoadGraph, route: Vec<Location>) -> Result<Self, MailRobotError> {
        if route.is_empty() {
            return Err(MailRobotError::EmptyRoute);
        }
        if let Some(unknown) = route.iter().find(|stop| !graph.contains(stop)) {
            return Err(MailRobotError::UnknownLocation(unknown.clone()));
        }
        Ok(Self { route })
    }

    /// Robot walking the village mail route.
    pub fn mail_route(graph: &RoadGraph) -> Result<Self, MailRobotError> {
        Self::new(graph, mail_route())
    }
}

impl Robot for RouteRobot {
    fn name(&self) -> &'static str {
        RobotKind::Route.name()
    }

    fn decide(
        &self,
        _graph: &RoadGraph,
        _state: &VillageState,
        memory: Memory,
        _rng: &mut Rng,
    ) -> Result<Decision, MailRobotError> {
        let directions = match memory {
            Memory::Directions(directions) if !directions.is_empty() => directions,
            _ => self.route.iter().cloned().collect(),
        };
        next_step(directions, Memory::Directions)
    }
}

/// Plans a route for the first parcel in the list, follows it to the end, then plans again.
#[derive(Debug, Default)]
pub struct GoalOrientedRobot {}

impl GoalOrientedRobot {
    pub fn new() -> Self {
        Self {}
    }
}

impl Robot for GoalOrientedRobot {
    fn name(&self) -> &'static str {
        RobotKind::GoalOriented.name()
    }

    fn decide(
        &self,
        graph: &RoadGraph,
        state: &VillageState,
        memory: Memory,
        _rng: &mut Rng,
    ) -> Result<Decision, MailRobotError> {
        let mut route = pending_route(memory);
        if route.is_empty() {
            let parcel = state
                .parcels()
                .first()
                .ok_or(MailRobotError::NothingToDeliver)?;
            route = find_route(graph, state.place(), waypoint(state.place(), parcel))?.into();
        }
        next_step(route, Memory::Route)
    }
}

/// Like GoalOrientedRobot, but when it needs a new plan it goes for the parcel with the
/// shortest route instead of the first one. It plans once per outstanding parcel, and it does not
/// change plans halfway along a route even if something closer turns up.
#[derive(Debug, Default)]
pub struct NearestParcelRobot {}

impl NearestParcelRobot {
    pub fn new() -> Self {
        Self {}
    }
}

impl Robot for NearestParcelRobot {
    fn name(&self) -> &'static str {
        RobotKind::NearestParcel.name()
    }

    fn decide(
        &self,
        graph: &RoadGraph,
        state: &VillageState,
        memory: Memory,
        _rng: &mut Rng,
    ) -> Result<Decision, MailRobotError> {
        let mut route = pending_route(memory);
        if route.is_empty() {
            let routes = state
                .parcels()
                .iter()
                .map(|parcel| find_route(graph, state.place(), waypoint(state.place(), parcel)))
                .collect::<Result<Vec<_>, _>>()?;

            // min_by_key keeps the first of several equally short routes.
            route = routes
                .into_iter()
                .min_by_key(|route| route.len())
                .ok_or(MailRobotError::NothingToDeliver)?
                .into();
        }
        next_step(route, Memory::Route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown robot {0:?}, expected one of: random, route, goal-oriented, nearest-parcel")]
pub struct UnknownRobotKind(String);

/// The robots this crate knows how to build, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotKind {
    Random,
    Route,
    GoalOriented,
    NearestParcel,
}

impl RobotKind {
    pub const ALL: [RobotKind; 4] = [
        RobotKind::Random,
        RobotKind::Route,
        RobotKind::GoalOriented,
        RobotKind::NearestParcel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RobotKind::Random => "random",
            RobotKind::Route => "route",
            RobotKind::GoalOriented => "goal-oriented",
            RobotKind::NearestParcel => "nearest-parcel",
        }
    }

    /// Build the robot. The route robot walks the village mail route, so `graph` must contain
    /// every stop on it.
    pub fn build(&self, graph: &RoadGraph) -> Result<Box<dyn Robot>, MailRobotError> {
        Ok(match self {
            RobotKind::Random => Box::new(RandomRobot::new()),
            RobotKind::Route => Box::new(RouteRobot::mail_route(graph)?),
            RobotKind::GoalOriented => Box::new(GoalOrientedRobot::new()),
            RobotKind::NearestParcel => Box::new(NearestParcelRobot::new()),
        })
    }
}

impl std::fmt::Display for RobotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RobotKind {
    type Err = UnknownRobotKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RobotKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownRobotKind(s.to_string()))
    }
}
