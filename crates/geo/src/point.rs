/// Geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this coordinate may be placed on the map.
    ///
    /// Both components must be in range, and the pair must not be the
    /// (0, 0) null-island sentinel that upstream records use for "no
    /// coordinate recorded".
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
            && !(self.lat == 0.0 && self.lng == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LatLng;

    #[test]
    fn in_range_coordinate_is_valid() {
        assert!(LatLng::new(48.8566, 2.3522).is_valid());
        assert!(LatLng::new(-90.0, 180.0).is_valid());
    }

    #[test]
    fn zero_pair_is_invalid() {
        assert!(!LatLng::new(0.0, 0.0).is_valid());
        // A zero component on its own is fine.
        assert!(LatLng::new(0.0, 2.35).is_valid());
        assert!(LatLng::new(48.85, 0.0).is_valid());
    }

    #[test]
    fn out_of_range_coordinate_is_invalid() {
        assert!(!LatLng::new(90.01, 0.0).is_valid());
        assert!(!LatLng::new(-91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, 180.5).is_valid());
        assert!(!LatLng::new(0.0, -181.0).is_valid());
    }
}
