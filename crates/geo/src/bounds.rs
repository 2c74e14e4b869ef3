use crate::distance::KM_PER_DEGREE;
use crate::point::LatLng;

// Keeps the longitude delta finite at extreme latitudes. Nothing in this
// domain sits poleward of ~89.4°, but the construction must not divide by
// zero there either.
const MIN_COS_LAT: f64 = 0.01;

/// Axis-aligned latitude/longitude rectangle.
///
/// Used as a cheap pre-filter before precise great-circle distance tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// The box circumscribing a circle of `radius_km` around `center`.
    ///
    /// Uses 1° latitude ≈ 111 km and 1° longitude ≈ 111 km × cos(lat),
    /// clamped to valid coordinate ranges. The box over-includes at its
    /// corners; callers refine with a haversine pass.
    pub fn around(center: LatLng, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let cos_lat = center.lat.to_radians().cos().max(MIN_COS_LAT);
        let lng_delta = radius_km / (KM_PER_DEGREE * cos_lat);

        Self {
            min_lat: (center.lat - lat_delta).max(-90.0),
            max_lat: (center.lat + lat_delta).min(90.0),
            min_lng: (center.lng - lng_delta).max(-180.0),
            max_lng: (center.lng + lng_delta).min(180.0),
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lng >= self.min_lng
            && p.lng <= self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;
    use crate::distance::within_radius_km;
    use crate::point::LatLng;

    #[test]
    fn box_circumscribes_the_circle() {
        let center = LatLng::new(48.8566, 2.3522);
        let bounds = GeoBounds::around(center, 50.0);

        // Points on the circle's cardinal extremes fall inside the box.
        for p in [
            LatLng::new(center.lat + 0.44, center.lng),
            LatLng::new(center.lat - 0.44, center.lng),
            LatLng::new(center.lat, center.lng + 0.66),
            LatLng::new(center.lat, center.lng - 0.66),
        ] {
            assert!(within_radius_km(center, p, 50.0));
            assert!(bounds.contains(p));
        }
    }

    #[test]
    fn corner_over_inclusion_is_expected() {
        let center = LatLng::new(40.0, 0.0);
        let bounds = GeoBounds::around(center, 50.0);
        let corner = LatLng::new(bounds.max_lat, bounds.max_lng);

        assert!(bounds.contains(corner));
        assert!(!within_radius_km(center, corner, 50.0));
    }

    #[test]
    fn polar_center_stays_finite_and_clamped() {
        let bounds = GeoBounds::around(LatLng::new(89.9, 10.0), 50.0);
        assert!(bounds.min_lat.is_finite() && bounds.max_lat.is_finite());
        assert!(bounds.min_lng.is_finite() && bounds.max_lng.is_finite());
        assert!(bounds.max_lat <= 90.0);
        assert!(bounds.min_lng >= -180.0 && bounds.max_lng <= 180.0);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let bounds = GeoBounds::new(-1.0, 1.0, -2.0, 2.0);
        assert!(bounds.contains(LatLng::new(1.0, 2.0)));
        assert!(bounds.contains(LatLng::new(-1.0, -2.0)));
        assert!(!bounds.contains(LatLng::new(1.1, 0.0)));
    }
}
