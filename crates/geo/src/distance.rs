use crate::point::LatLng;

/// Mean Earth radius (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance between two coordinates, in kilometers.
///
/// Haversine on a sphere of [`EARTH_RADIUS_KM`]; trigonometry in radians,
/// degrees converted at the boundary.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h =
        (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Inclusive radius test: a point exactly on the circle is inside it.
pub fn within_radius_km(a: LatLng, b: LatLng, radius_km: f64) -> bool {
    haversine_km(a, b) <= radius_km
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, within_radius_km};
    use crate::point::LatLng;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = LatLng::new(10.0, 20.0);
        let b = LatLng::new(11.0, 20.0);
        // One degree of latitude at R = 6371 km.
        assert_close(haversine_km(a, b), 111.195, 0.01);
    }

    #[test]
    fn is_symmetric_and_zero_at_same_point() {
        let a = LatLng::new(48.8566, 2.3522);
        let b = LatLng::new(51.5074, -0.1278);
        assert_close(haversine_km(a, b), haversine_km(b, a), 1e-9);
        assert_close(haversine_km(a, a), 0.0, 1e-9);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let center = LatLng::new(40.0, 3.0);
        let venue = LatLng::new(41.0, 3.0);
        let d = haversine_km(center, venue);

        assert!(within_radius_km(center, venue, d));
        assert!(!within_radius_km(center, venue, d - 1.0));
    }

    #[test]
    fn nearby_point_excluded_past_the_circle() {
        let center = LatLng::new(40.0, 3.0);
        // 1.01 degrees of latitude, roughly 112.3 km.
        let venue = LatLng::new(41.01, 3.0);
        assert!(!within_radius_km(center, venue, 111.2));
        assert!(within_radius_km(center, venue, 113.0));
    }
}
