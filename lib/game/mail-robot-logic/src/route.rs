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

//! Shortest route search.

use std::collections::VecDeque;

use crate::{HashSet, Location, MailRobotError, RoadGraph};

/// Route is the places to walk through to get somewhere. The start is not included, the goal
/// is the last element.
pub type Route = Vec<Location>;

/// Find a shortest route from `from` to `to` using breadth-first search.
///
/// Neighbors are expanded in road declaration order and the first route to reach `to` wins, so
/// the same graph always gives the same route. Asking for a route from a place to itself is a
/// `NoRoute` error rather than an empty route.
pub fn find_route(
    graph: &RoadGraph,
    from: &Location,
    to: &Location,
) -> Result<Route, MailRobotError> {
    if !graph.contains(from) {
        return Err(MailRobotError::UnknownLocation(from.clone()));
    }
    if !graph.contains(to) {
        return Err(MailRobotError::UnknownLocation(to.clone()));
    }
    if from == to {
        return Err(MailRobotError::NoRoute {
            from: from.clone(),
            to: to.clone(),
        });
    }

    // A place is scheduled once it is on the work list, and is never scheduled again.
    let mut scheduled: HashSet<&Location> = HashSet::default();
    scheduled.insert(from);
    let mut work: VecDeque<(&Location, Route)> = VecDeque::new();
    work.push_back((from, Route::new()));

    while let Some((at, route)) = work.pop_front() {
        for place in graph.neighbors(at)? {
            if place == to {
                let mut found = route;
                found.push(place.clone());
                return Ok(found);
            }
            if scheduled.insert(place) {
                let mut next = route.clone();
                next.push(place.clone());
                work.push_back((place, next));
            }
        }
    }

    Err(MailRobotError::NoRoute {
        from: from.clone(),
        to: to.clone(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::village::{village_graph, POST_OFFICE};

    fn loc(name: &str) -> Location {
        Location::from(name)
    }

    // Plain BFS distance, independent of find_route, used to check route lengths.
    fn distance(graph: &RoadGraph, from: &Location, to: &Location) -> Option<usize> {
        let mut dist: crate::HashMap<Location, usize> = crate::HashMap::default();
        dist.insert(from.clone(), 0);
        let mut queue = VecDeque::from([from.clone()]);
        while let Some(at) = queue.pop_front() {
            let d = dist[&at];
            for next in graph.neighbors(&at).unwrap() {
                if !dist.contains_key(next) {
                    dist.insert(next.clone(), d + 1);
                    queue.push_back(next.clone());
                }
            }
        }
        dist.get(to).copied()
    }

    #[test]
    fn test_post_office_to_cabin() {
        let graph = village_graph().unwrap();
        let route = find_route(&graph, &loc(POST_OFFICE), &loc("Cabin")).unwrap();
        assert_eq!(route, vec![loc("Alice's House"), loc("Cabin")]);
    }

    #[test]
    fn test_neighbor_is_one_step() {
        let graph = village_graph().unwrap();
        let route = find_route(&graph, &loc(POST_OFFICE), &loc("Marketplace")).unwrap();
        assert_eq!(route, vec![loc("Marketplace")]);
    }

    #[test]
    fn test_ties_follow_declaration_order() {
        // A reaches D through both B and C; B is declared first.
        let graph = RoadGraph::from_edges(["A-B", "A-C", "B-D", "C-D"]).unwrap();
        let route = find_route(&graph, &loc("A"), &loc("D")).unwrap();
        assert_eq!(route, vec![loc("B"), loc("D")]);

        let graph = RoadGraph::from_edges(["A-C", "A-B", "B-D", "C-D"]).unwrap();
        let route = find_route(&graph, &loc("A"), &loc("D")).unwrap();
        assert_eq!(route, vec![loc("C"), loc("D")]);
    }

    #[test]
    fn test_route_to_self_is_no_route() {
        let graph = village_graph().unwrap();
        assert_eq!(
            find_route(&graph, &loc("Farm"), &loc("Farm")),
            Err(MailRobotError::NoRoute {
                from: loc("Farm"),
                to: loc("Farm"),
            })
        );
    }

    #[test]
    fn test_disconnected_is_no_route() {
        let graph = RoadGraph::from_edges(["A-B", "C-D"]).unwrap();
        assert_eq!(
            find_route(&graph, &loc("A"), &loc("D")),
            Err(MailRobotError::NoRoute {
                from: loc("A"),
                to: loc("D"),
            })
        );
    }

    #[test]
    fn test_unknown_endpoints() {
        let graph = village_graph().unwrap();
        assert_eq!(
            find_route(&graph, &loc("Moon"), &loc("Farm")),
            Err(MailRobotError::UnknownLocation(loc("Moon")))
        );
        assert_eq!(
            find_route(&graph, &loc("Farm"), &loc("Moon")),
            Err(MailRobotError::UnknownLocation(loc("Moon")))
        );
    }

    #[test]
    fn test_village_routes_are_shortest_and_walkable() {
        let graph = village_graph().unwrap();
        for from in graph.locations() {
            for to in graph.locations() {
                if from == to {
                    continue;
                }
                let route = find_route(&graph, from, to).unwrap();
                assert_eq!(Some(route.len()), distance(&graph, from, to));
                assert_eq!(route.last(), Some(to));

                let mut at = from;
                for step in &route {
                    assert!(graph.is_adjacent(at, step), "{} -> {}", at, step);
                    at = step;
                }
            }
        }
    }

    fn connected_edge_list() -> impl Strategy<Value = Vec<String>> {
        // Chain 0-1-2-...-7 keeps the graph connected; the extra roads add shortcuts.
        prop::collection::vec((0..8u8, 0..8u8), 0..12).prop_map(|extra| {
            let mut edges: Vec<String> = (0..7).map(|i| format!("{}-{}", i, i + 1)).collect();
            edges.extend(extra.into_iter().map(|(a, b)| format!("{}-{}", a, b)));
            edges
        })
    }

    proptest! {
        #[test]
        fn test_route_length_is_shortest_distance(
            edges in connected_edge_list(),
            from in 0..8u8,
            to in 0..8u8,
        ) {
            prop_assume!(from != to);
            let graph = RoadGraph::from_edges(&edges).unwrap();
            let from = Location::from(from.to_string());
            let to = Location::from(to.to_string());

            let route = find_route(&graph, &from, &to).unwrap();
            prop_assert_eq!(Some(route.len()), distance(&graph, &from, &to));

            let again = find_route(&graph, &from, &to).unwrap();
            prop_assert_eq!(route, again);
        }
    }
}
