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

//! Persistent group.
//!
//! A group is a set of values kept in insertion order. It is persistent: adding or deleting a
//! value returns a new group and the old one stays exactly as it was, so a group can be handed
//! around and kept as a snapshot without copying.

use std::sync::Arc;

/// Persistent group of distinct values.
///
/// Values are compared with `==`. Operations that would not change the group (adding a member,
/// deleting a non-member) return a group that shares storage with the original.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PersistentGroup<T> {
    values: Arc<[T]>,
}

impl<T> PersistentGroup<T> {
    /// The empty group.
    pub fn empty() -> Self {
        Self {
            values: Arc::from(Vec::new()),
        }
    }

    /// Members in insertion order.
    pub fn group(&self) -> &[T] {
        &self.values
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Check if two groups share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl<T: PartialEq + Clone> PersistentGroup<T> {
    /// Group with `value` added at the end.
    pub fn add(&self, value: T) -> Self {
        if self.has(&value) {
            return self.clone();
        }
        let values: Vec<T> = self
            .values
            .iter()
            .cloned()
            .chain(std::iter::once(value))
            .collect();
        Self {
            values: Arc::from(values),
        }
    }

    /// Group without `value`.
    pub fn delete(&self, value: &T) -> Self {
        if !self.has(value) {
            return self.clone();
        }
        let values: Vec<T> = self.values.iter().filter(|v| *v != value).cloned().collect();
        Self {
            values: Arc::from(values),
        }
    }
}

impl<T: PartialEq> PersistentGroup<T> {
    /// Check if `value` is a member.
    pub fn has(&self, value: &T) -> bool {
        self.values.contains(value)
    }
}

impl<T> Clone for PersistentGroup<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl<T> Default for PersistentGroup<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Duplicates are dropped; the first occurrence keeps its position.
impl<T: PartialEq> FromIterator<T> for PersistentGroup<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut values = Vec::new();
        for value in iter {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Self {
            values: Arc::from(values),
        }
    }
}

impl<T: PartialEq> From<Vec<T>> for PersistentGroup<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a PersistentGroup<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
