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

//! Meadowfield, the small village used by the robot exercises.

use crate::{Location, MailRobotError, RoadGraph};

/// Where robots start and where new parcels are handed out.
pub const POST_OFFICE: &str = "Post Office";

/// The 14 roads of the village.
pub const VILLAGE_ROADS: [&str; 14] = [
    "Alice's House-Bob's House",
    "Alice's House-Cabin",
    "Alice's House-Post Office",
    "Bob's House-Town Hall",
    "Daria's House-Ernie's House",
    "Daria's House-Town Hall",
    "Ernie's House-Grete's House",
    "Grete's House-Farm",
    "Grete's House-Shop",
    "Marketplace-Farm",
    "Marketplace-Post Office",
    "Marketplace-Shop",
    "Marketplace-Town Hall",
    "Shop-Town Hall",
];

/// A loop starting and ending at the post office that passes every place in the village.
pub const MAIL_ROUTE: [&str; 13] = [
    "Alice's House",
    "Cabin",
    "Alice's House",
    "Bob's House",
    "Town Hall",
    "Daria's House",
    "Ernie's House",
    "Grete's House",
    "Shop",
    "Grete's House",
    "Farm",
    "Marketplace",
    "Post Office",
];

/// Road graph of the village.
pub fn village_graph() -> Result<RoadGraph, MailRobotError> {
    RoadGraph::from_edges(VILLAGE_ROADS)
}

/// The mail route as locations.
pub fn mail_route() -> Vec<Location> {
    MAIL_ROUTE.iter().copied().map(Location::from).collect()
}
