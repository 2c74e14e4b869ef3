use geo::{GeoBounds, LatLng, within_radius_km};
use venues::Venue;

/// A circular venue query.
///
/// The two-stage filter: `bounds()` gives the cheap axis-aligned box for
/// the upstream call, `refine()` corrects the box's corner over-inclusion
/// with a precise great-circle pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RadiusQuery {
    pub center: LatLng,
    pub radius_km: f64,
}

impl RadiusQuery {
    pub fn new(center: LatLng, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::around(self.center, self.radius_km)
    }

    /// Refines bounding-box results to the true circle (inclusive).
    ///
    /// Records with missing or invalid coordinates are dropped before any
    /// distance is computed; a batch of only invalid records refines to an
    /// empty result, which is still a success.
    pub fn refine(&self, candidates: Vec<Venue>) -> Vec<Venue> {
        candidates
            .into_iter()
            .filter(|venue| {
                let Some(p) = venue.position() else {
                    return false;
                };
                p.is_valid() && within_radius_km(self.center, p, self.radius_km)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::RadiusQuery;
    use geo::{LatLng, haversine_km};
    use venues::{Venue, VenueCategory};

    fn venue(id: &str, lat: f64, lng: f64) -> Venue {
        Venue {
            id: id.to_string(),
            name: id.to_string(),
            latitude: Some(lat),
            longitude: Some(lng),
            category: VenueCategory::Gallery,
            address: None,
            city: None,
            country: None,
            website: None,
            opening_hours: None,
            image: None,
        }
    }

    #[test]
    fn keeps_the_circle_drops_the_corners() {
        let query = RadiusQuery::new(LatLng::new(40.0, 0.0), 50.0);
        let bounds = query.bounds();

        // Inside both box and circle.
        let near = venue("near", 40.2, 0.1);
        // A box corner: included by the pre-filter, outside the circle.
        let corner = venue("corner", bounds.max_lat, bounds.max_lng);
        assert!(bounds.contains(near.position().expect("coords")));
        assert!(bounds.contains(corner.position().expect("coords")));

        let kept = query.refine(vec![near, corner]);
        let ids: Vec<&str> = kept.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["near"]);
    }

    #[test]
    fn boundary_is_inclusive() {
        let center = LatLng::new(40.0, 3.0);
        let edge = venue("edge", 41.0, 3.0);
        let d = haversine_km(center, edge.position().expect("coords"));

        let exact = RadiusQuery::new(center, d);
        assert_eq!(exact.refine(vec![edge.clone()]).len(), 1);

        let short = RadiusQuery::new(center, d - 1.0);
        assert!(short.refine(vec![edge]).is_empty());
    }

    #[test]
    fn invalid_records_refine_to_an_empty_success() {
        let query = RadiusQuery::new(LatLng::new(40.0, 0.0), 50.0);

        let mut missing = venue("missing", 0.0, 0.0);
        missing.latitude = None;
        let batch = vec![missing, venue("null", 0.0, 0.0), venue("range", 120.0, 0.0)];

        assert!(query.refine(batch).is_empty());
    }
}
