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

//! Road graph of the village.

use crate::{HashMap, Location, MailRobotError};

/// Road graph. Every road is two-way, so if B is a neighbor of A then A is a neighbor of B.
///
/// Neighbors keep the order in which their roads were declared. Route search walks neighbors in
/// that order, which is what makes ties between equally short routes deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadGraph {
    adjacency: HashMap<Location, Vec<Location>>,

    /// All locations in the order they were first seen.
    locations: Vec<Location>,
}

impl RoadGraph {
    /// Build a graph from road descriptors such as "Alice's House-Cabin". Each descriptor is
    /// split on its first '-'.
    pub fn from_edges<I, S>(edges: I) -> Result<Self, MailRobotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::default();
        for edge in edges {
            let (from, to) = parse_edge(edge.as_ref())?;
            graph.add_edge(from.clone(), to.clone());
            graph.add_edge(to, from);
        }
        Ok(graph)
    }

    fn add_edge(&mut self, from: Location, to: Location) {
        match self.adjacency.get_mut(&from) {
            Some(neighbors) => neighbors.push(to),
            None => {
                self.locations.push(from.clone());
                self.adjacency.insert(from, vec![to]);
            }
        }
    }

    /// Neighbors of a location, in road declaration order.
    pub fn neighbors(&self, location: &Location) -> Result<&[Location], MailRobotError> {
        self.adjacency
            .get(location)
            .map(|neighbors| neighbors.as_slice())
            .ok_or_else(|| MailRobotError::UnknownLocation(location.clone()))
    }

    /// Check if a location is in the graph.
    pub fn contains(&self, location: &Location) -> bool {
        self.adjacency.contains_key(location)
    }

    /// Check if there is a road directly from `from` to `to`. Unknown locations are never
    /// adjacent to anything.
    pub fn is_adjacent(&self, from: &Location, to: &Location) -> bool {
        self.adjacency
            .get(from)
            .map_or(false, |neighbors| neighbors.contains(to))
    }

    /// All locations, in the order they were first seen.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

fn parse_edge(edge: &str) -> Result<(Location, Location), MailRobotError> {
    match edge.split_once('-') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((Location::from(from), Location::from(to)))
        }
        _ => Err(MailRobotError::MalformedEdge(edge.to_string())),
    }
}
