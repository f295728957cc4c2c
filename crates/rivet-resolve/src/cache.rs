// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-invocation resolution cache.
//!
//! Lives only as long as the resolver that owns it, so nothing survives
//! between invocations. A zero duration disables caching entirely.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rivet_core::Coordinate;

/// Resolved coordinates keyed by the requested coordinate.
#[derive(Debug)]
pub struct ResolutionCache {
    ttl: Duration,
    entries: HashMap<Coordinate, (Instant, Coordinate)>,
}

impl ResolutionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, requested: &Coordinate) -> Option<&Coordinate> {
        self.get_at(requested, Instant::now())
    }

    fn get_at(&self, requested: &Coordinate, now: Instant) -> Option<&Coordinate> {
        if !self.is_enabled() {
            return None;
        }
        self.entries
            .get(requested)
            .filter(|(stored, _)| now.saturating_duration_since(*stored) < self.ttl)
            .map(|(_, resolved)| resolved)
    }

    pub fn insert(&mut self, requested: Coordinate, resolved: Coordinate) {
        if self.is_enabled() {
            self.entries.insert(requested, (Instant::now(), resolved));
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
