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

#![warn(missing_docs)]

//! Mail robot world logic.
//!
//! A village is a graph of named places joined by roads. Parcels wait at some place and need to
//! be carried to an address. This crate holds the road graph, the shortest route search and the
//! immutable village state that a robot moves through. It is intended to be driven by a robot
//! simulation, see the `mail-robot` crate.

use serde::{Deserialize, Serialize};

pub mod graph;
pub mod route;
pub mod state;
pub mod village;

pub use graph::RoadGraph;
pub use route::{find_route, Route};
pub use state::{Parcel, VillageState};

/// Hash map used throughout the crate. Keys are short place names, so Fx is a good fit.
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// Hash set used throughout the crate.
pub type HashSet<T> = rustc_hash::FxHashSet<T>;

/// Mail robot error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailRobotError {
    /// The location was never registered in the road graph.
    #[error("unknown location: {0}")]
    UnknownLocation(Location),

    /// There is no road route between two locations.
    #[error("no route from {from} to {to}")]
    NoRoute {
        /// Where the search started.
        from: Location,

        /// Where the search was heading.
        to: Location,
    },

    /// The location is in the graph but no road leaves it.
    #[error("no roads lead out of {0}")]
    DeadEnd(Location),

    /// A road descriptor is not of the form "A-B".
    #[error("malformed road, expected \"A-B\": {0:?}")]
    MalformedEdge(String),

    /// Parcels need a place and a different address, so the graph needs two locations.
    #[error("need at least two locations to place parcels, graph has {0}")]
    NotEnoughLocations(usize),

    /// A fixed route robot was given no stops.
    #[error("fixed route has no stops")]
    EmptyRoute,

    /// A planning robot was asked for a move when every parcel is delivered.
    #[error("no outstanding parcels to plan for")]
    NothingToDeliver,

    /// A simulation hit its turn limit before every parcel was delivered.
    #[error("simulation did not finish within {turns} turns")]
    SimulationDiverged {
        /// Turns taken before giving up.
        turns: usize,
    },

    /// A benchmark was asked to run zero tasks.
    #[error("benchmark needs at least one task")]
    NoTasks,
}

/// Location is the name of a place in the village, e.g. "Post Office".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Create a new location from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name of the location.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
