use std::collections::BTreeMap;

use geo::LatLng;

use crate::venue::{Venue, VenueCategory};

/// A coordinate-valid projection of a [`Venue`].
///
/// This is the only venue representation the reconciliation layer and the
/// rendering surface ever see.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    position: LatLng,
    venue: Venue,
}

impl MapPoint {
    /// Validates the record's coordinates.
    ///
    /// Returns `None` for a missing pair, a (0, 0) pair, or anything out of
    /// range; such records never become markers.
    pub fn from_venue(venue: Venue) -> Option<Self> {
        let position = venue.position()?;
        if !position.is_valid() {
            return None;
        }
        Some(Self { position, venue })
    }

    pub fn id(&self) -> &str {
        &self.venue.id
    }

    pub fn name(&self) -> &str {
        &self.venue.name
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn category(&self) -> VenueCategory {
        self.venue.category
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }
}

/// Duplicate-free marker state keyed by venue id.
///
/// Entries live in a `BTreeMap` so iteration (and therefore rendering and
/// tests) is order-stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerCollection {
    points: BTreeMap<String, MapPoint>,
}

impl MarkerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&MapPoint> {
        self.points.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapPoint> {
        self.points.values()
    }

    /// Union by id; incoming entries win on conflict (fresher data).
    ///
    /// Coordinate-invalid records are dropped silently, per record. Returns
    /// the number of entries inserted or updated.
    pub fn merge(&mut self, incoming: Vec<Venue>) -> usize {
        let mut reconciled = 0;
        for venue in incoming {
            let Some(point) = MapPoint::from_venue(venue) else {
                continue;
            };
            self.points.insert(point.id().to_string(), point);
            reconciled += 1;
        }
        reconciled
    }

    /// Discards all existing markers in favor of `incoming`.
    ///
    /// Used for user-initiated scope changes (search, re-center), which are
    /// authoritative rather than incremental.
    pub fn replace(&mut self, incoming: Vec<Venue>) -> usize {
        self.points.clear();
        self.merge(incoming)
    }

    /// The subset the renderer draws: everything, or one category.
    pub fn filtered(&self, category: Option<VenueCategory>) -> Vec<&MapPoint> {
        self.points
            .values()
            .filter(|p| category.is_none_or(|c| p.category() == c))
            .collect()
    }
}
