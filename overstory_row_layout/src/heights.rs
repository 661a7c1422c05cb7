// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-key measured row heights with an idempotence guard.

use core::hash::Hash;

use hashbrown::HashMap;

/// Last-measured pixel height per row key.
///
/// Rows report their real rendered height after layout, one event-loop turn
/// after the paint that revealed them; until then, callers substitute a
/// configured minimum via [`HeightCache::height_or`]. Entries for keys that
/// leave the tree are **not** evicted — a stale entry is simply unused and
/// the map stays bounded by the distinct keys ever measured. Callers that
/// churn key spaces over very long sessions should reuse keys or replace
/// the cache along with the view.
#[derive(Clone, Debug, Default)]
pub struct HeightCache<K> {
    measured: HashMap<K, f64>,
}

impl<K: Copy + Eq + Hash> HeightCache<K> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            measured: HashMap::new(),
        }
    }

    /// Records a measured height; returns `true` if the stored value changed.
    ///
    /// Reporting the exact height already stored is a no-op and returns
    /// `false`, which is what keeps the measure → relayout feedback loop
    /// from cycling. Finite negative heights clamp to `0.0`; non-finite
    /// inputs are caught by a debug assertion so misuse does not go
    /// unnoticed.
    pub fn update(&mut self, key: K, height: f64) -> bool {
        debug_assert!(
            height.is_finite(),
            "HeightCache heights must be finite; got {height:?}"
        );
        let height = if height.is_sign_negative() { 0.0 } else { height };
        match self.measured.get(&key) {
            Some(&stored) if stored == height => false,
            _ => {
                self.measured.insert(key, height);
                true
            }
        }
    }

    /// Returns the measured height for `key`, if any.
    #[must_use]
    pub fn get(&self, key: K) -> Option<f64> {
        self.measured.get(&key).copied()
    }

    /// Returns the measured height for `key`, or `fallback` when unmeasured.
    #[must_use]
    pub fn height_or(&self, key: K, fallback: f64) -> f64 {
        self.get(key).unwrap_or(fallback)
    }

    /// Number of keys ever measured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measured.len()
    }

    /// Returns `true` if nothing has been measured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }
}
