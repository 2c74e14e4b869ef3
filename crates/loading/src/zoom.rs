/// Incremental-load radius as a step function of zoom.
///
/// Coarser radii at low zoom trade fetch frequency against result density.
/// The breakpoints are tuning; the contract is only that the radius never
/// increases with zoom.
pub fn radius_km_for_zoom(zoom: f64) -> f64 {
    if zoom >= 14.0 {
        5.0
    } else if zoom >= 12.0 {
        10.0
    } else if zoom >= 10.0 {
        25.0
    } else {
        50.0
    }
}

#[cfg(test)]
mod tests {
    use super::radius_km_for_zoom;

    #[test]
    fn radius_never_increases_with_zoom() {
        let mut zoom = 0.0;
        let mut previous = radius_km_for_zoom(zoom);
        while zoom <= 20.0 {
            let radius = radius_km_for_zoom(zoom);
            assert!(radius <= previous, "radius grew at zoom {zoom}");
            previous = radius;
            zoom += 0.5;
        }
    }

    #[test]
    fn city_zoom_uses_a_fine_radius() {
        assert_eq!(radius_km_for_zoom(15.0), 5.0);
        assert_eq!(radius_km_for_zoom(8.0), 50.0);
    }
}
