use geo::LatLng;

/// Per-session tuning.
///
/// Constructed once by the shell and injected; there is no module-level
/// state shared across sessions or tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SessionConfig {
    /// Used when geolocation is denied, times out, or is unavailable.
    pub fallback_center: LatLng,
    /// Wide first load so a sparse map still gets enough results.
    pub initial_radius_km: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_center: LatLng::new(48.8566, 2.3522),
            initial_radius_km: 50.0,
        }
    }
}
