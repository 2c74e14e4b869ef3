use geo::LatLng;
use serde::{Deserialize, Serialize};

/// Point-of-interest categories known to the map.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueCategory {
    #[default]
    Gallery,
    Museum,
    Event,
}

impl std::fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenueCategory::Gallery => write!(f, "gallery"),
            VenueCategory::Museum => write!(f, "museum"),
            VenueCategory::Event => write!(f, "event"),
        }
    }
}

/// A venue record as the upstream source returns it.
///
/// Coordinates are optional and untrusted here; `MapPoint::from_venue` is
/// the only path onto the map. The descriptive fields are pass-through for
/// detail cards and are never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub category: VenueCategory,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Venue {
    /// The stored coordinate pair, unvalidated.
    pub fn position(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Venue, VenueCategory};

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let v: Venue = serde_json::from_str(
            r#"{"id": "g1", "name": "Perrotin", "latitude": 48.86, "longitude": 2.36}"#,
        )
        .expect("decode");
        assert_eq!(v.id, "g1");
        assert_eq!(v.category, VenueCategory::Gallery);
        assert_eq!(v.address, None);
    }

    #[test]
    fn category_round_trips_lowercase() {
        let v: Venue = serde_json::from_str(
            r#"{"id": "m1", "name": "Louvre", "category": "museum"}"#,
        )
        .expect("decode");
        assert_eq!(v.category, VenueCategory::Museum);
        assert_eq!(v.position(), None);
        assert_eq!(v.category.to_string(), "museum");
    }
}
