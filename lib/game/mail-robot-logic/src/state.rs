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

//! Village state: where the robot is and which parcels are still outstanding.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Location, MailRobotError, RoadGraph};

/// Parcel waiting at, or being carried through, `place` on its way to `address`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parcel {
    /// Where the parcel is now.
    pub place: Location,

    /// Where the parcel needs to go.
    pub address: Location,
}

impl Parcel {
    /// Create a new parcel.
    pub fn new(place: impl Into<Location>, address: impl Into<Location>) -> Self {
        Self {
            place: place.into(),
            address: address.into(),
        }
    }

    /// A parcel that has reached its address is delivered.
    pub fn is_delivered(&self) -> bool {
        self.place == self.address
    }
}

/// Immutable snapshot of the village. Moving the robot returns a new state and leaves this one
/// untouched, so the same state can be handed to several robots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VillageState {
    place: Location,
    parcels: Vec<Parcel>,
}

impl VillageState {
    /// Create a new state. Every location must be in the graph. Parcels that are already at
    /// their address count as delivered and are dropped.
    pub fn new(
        graph: &RoadGraph,
        place: Location,
        parcels: Vec<Parcel>,
    ) -> Result<Self, MailRobotError> {
        if !graph.contains(&place) {
            return Err(MailRobotError::UnknownLocation(place));
        }
        for parcel in &parcels {
            for location in [&parcel.place, &parcel.address] {
                if !graph.contains(location) {
                    return Err(MailRobotError::UnknownLocation(location.clone()));
                }
            }
        }
        let parcels = parcels.into_iter().filter(|p| !p.is_delivered()).collect();
        Ok(Self { place, parcels })
    }

    /// Generate a random task of `parcel_count` parcels with the robot at `start`.
    ///
    /// Each parcel gets a random address, then a random place that differs from the address.
    pub fn random<R: Rng + ?Sized>(
        graph: &RoadGraph,
        parcel_count: usize,
        start: &Location,
        rng: &mut R,
    ) -> Result<Self, MailRobotError> {
        if !graph.contains(start) {
            return Err(MailRobotError::UnknownLocation(start.clone()));
        }
        let locations = graph.locations();
        if locations.len() < 2 {
            return Err(MailRobotError::NotEnoughLocations(locations.len()));
        }

        let parcels = (0..parcel_count)
            .map(|_| {
                let address = &locations[rng.gen_range(0..locations.len())];
                let place = loop {
                    let place = &locations[rng.gen_range(0..locations.len())];
                    if place != address {
                        break place;
                    }
                };
                Parcel::new(place.clone(), address.clone())
            })
            .collect();

        Ok(Self {
            place: start.clone(),
            parcels,
        })
    }

    /// Where the robot is.
    pub fn place(&self) -> &Location {
        &self.place
    }

    /// Outstanding parcels, in the order they were created.
    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    /// All parcels have been delivered.
    pub fn is_done(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Move the robot to `destination`.
    ///
    /// If there is no road from the current place to `destination` nothing happens and the
    /// returned state equals this one. Otherwise parcels at the current place travel with the
    /// robot, and those that arrive at their address are delivered and removed.
    pub fn move_to(&self, graph: &RoadGraph, destination: &Location) -> VillageState {
        if !graph.is_adjacent(&self.place, destination) {
            return self.clone();
        }
        let parcels = self
            .parcels
            .iter()
            .map(|parcel| {
                if parcel.place != self.place {
                    parcel.clone()
                } else {
                    Parcel::new(destination.clone(), parcel.address.clone())
                }
            })
            .filter(|parcel| !parcel.is_delivered())
            .collect();
        VillageState {
            place: destination.clone(),
            parcels,
        }
    }
}
