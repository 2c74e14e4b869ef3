use std::collections::BTreeSet;

use geo::LatLng;

/// Composite key for one fetched tile: rounded center plus radius.
pub fn area_key(center: LatLng, radius_km: f64) -> String {
    format!("{:.2}_{:.2}_{}", center.lat, center.lng, radius_km)
}

/// Records which (rounded-center, radius) tiles have already been fetched.
///
/// Centers round to two decimal places (~1.1 km grid), which keeps false
/// positives rare relative to the radii in use. Re-fetching a tile is
/// tolerable; skipping a needed fetch is not, so a hit requires the exact
/// (rounded-center, radius) tuple. Keys live in a `BTreeSet` for stable
/// traversal order.
#[derive(Debug, Clone, Default)]
pub struct AreaTracker {
    fetched: BTreeSet<String>,
}

impl AreaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fetched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetched.is_empty()
    }

    /// False iff this exact (rounded-center, radius) tile was already
    /// marked this session.
    pub fn should_fetch(&self, center: LatLng, radius_km: f64) -> bool {
        !self.fetched.contains(&area_key(center, radius_km))
    }

    pub fn mark_fetched(&mut self, center: LatLng, radius_km: f64) {
        self.fetched.insert(area_key(center, radius_km));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fetched.contains(key)
    }
}
