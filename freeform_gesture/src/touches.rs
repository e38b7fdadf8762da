// Copyright 2025 the Freeform Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable touch identities and the two-slot table of tracked touches.

use kurbo::Point;
use smallvec::SmallVec;

/// Host-assigned identifier, stable for the lifetime of one finger contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchId(pub u64);

/// One touch in a began/moved/ended/cancelled batch.
///
/// Points are surface-local, already scaled to the surface's native
/// resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchSample {
    /// Which finger.
    pub id: TouchId,
    /// Where it is.
    pub point: Point,
}

impl TouchSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(id: u64, point: impl Into<Point>) -> Self {
        Self {
            id: TouchId(id),
            point: point.into(),
        }
    }
}

/// The touches participating in the current gesture, in arrival order.
///
/// Holds at most [`TouchTable::CAPACITY`] entries. Further touches are
/// rejected, which is how a third finger ends up ignored.
#[derive(Clone, Debug, Default)]
pub struct TouchTable {
    entries: SmallVec<[TouchSample; 2]>,
}

impl TouchTable {
    /// Maximum number of tracked touches.
    pub const CAPACITY: usize = 2;

    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `sample`.
    ///
    /// Returns `false` if the table is full or the id is already tracked.
    pub fn push(&mut self, sample: TouchSample) -> bool {
        if self.entries.len() >= Self::CAPACITY || self.contains(sample.id) {
            return false;
        }
        self.entries.push(sample);
        true
    }

    /// Stops tracking `id`, returning its last known sample.
    pub fn remove(&mut self, id: TouchId) -> Option<TouchSample> {
        let index = self.entries.iter().position(|s| s.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Returns `true` if `id` is tracked.
    #[must_use]
    pub fn contains(&self, id: TouchId) -> bool {
        self.entries.iter().any(|s| s.id == id)
    }

    /// The earliest tracked touch.
    #[must_use]
    pub fn first(&self) -> Option<&TouchSample> {
        self.entries.first()
    }

    /// The most recently added touch.
    #[must_use]
    pub fn last(&self) -> Option<&TouchSample> {
        self.entries.last()
    }

    /// Number of tracked touches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked samples in arrival order.
    #[must_use]
    pub fn samples(&self) -> &[TouchSample] {
        &self.entries
    }

    /// Last known points in arrival order.
    #[must_use]
    pub fn points(&self) -> SmallVec<[Point; 2]> {
        self.entries.iter().map(|s| s.point).collect()
    }

    /// Refreshes tracked touches from a batch, ignoring untracked ids.
    ///
    /// Returns `true` if any tracked touch appeared in the batch.
    pub fn update(&mut self, samples: &[TouchSample]) -> bool {
        let mut touched = false;
        for sample in samples {
            if let Some(entry) = self.entries.iter_mut().find(|s| s.id == sample.id) {
                entry.point = sample.point;
                touched = true;
            }
        }
        touched
    }

    /// Returns `true` if any sample in the batch is tracked.
    #[must_use]
    pub fn intersects(&self, samples: &[TouchSample]) -> bool {
        samples.iter().any(|s| self.contains(s.id))
    }

    /// Drops every touch but the earliest.
    pub fn retain_first(&mut self) {
        self.entries.truncate(1);
    }

    /// Drops every touch.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
