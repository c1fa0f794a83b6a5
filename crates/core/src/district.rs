//! Districts and geographic points.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A WGS84 point. The origin stands for "location unknown".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range or non-finite coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidCoordinate(format!("latitude {latitude}")));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate(format!("longitude {longitude}")));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Whether this is the placeholder origin.
    pub fn is_unknown(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// District metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub code: String,
    pub name: String,
    /// Localized (Hindi) display name.
    pub hindi_name: String,
    pub state_code: Option<String>,
    pub state_name: String,
    #[serde(default)]
    pub location: GeoPoint,
}

/// Closest district to `point` within `radius_km`, if any.
///
/// Districts without a known location never match.
pub fn nearest_district<'a>(
    districts: &'a [District],
    point: &GeoPoint,
    radius_km: f64,
) -> Option<&'a District> {
    districts
        .iter()
        .filter(|d| !d.location.is_unknown())
        .map(|d| (d, d.location.distance_km(point)))
        .filter(|(_, distance)| *distance <= radius_km)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(code: &str, lat: f64, lon: f64) -> District {
        District {
            code: code.to_string(),
            name: format!("District {code}"),
            hindi_name: format!("जिला {code}"),
            state_code: Some("27".to_string()),
            state_name: "Rajasthan".to_string(),
            location: GeoPoint {
                latitude: lat,
                longitude: lon,
            },
        }
    }

    #[test]
    fn haversine_known_distance() {
        // Jaipur to Ajmer is roughly 120 km as the crow flies.
        let jaipur = GeoPoint::new(26.9124, 75.7873).unwrap();
        let ajmer = GeoPoint::new(26.4499, 74.6399).unwrap();
        let d = jaipur.distance_km(&ajmer);
        assert!((120.0..135.0).contains(&d), "got {d}");
        assert!(jaipur.distance_km(&jaipur) < 1e-9);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn nearest_picks_closest_within_radius() {
        let districts = vec![
            district("2701", 26.4499, 74.6399),
            district("2702", 27.5530, 76.6346),
            district("2799", 0.0, 0.0),
        ];
        let near_ajmer = GeoPoint::new(26.50, 74.70).unwrap();
        let found = nearest_district(&districts, &near_ajmer, 100.0).unwrap();
        assert_eq!(found.code, "2701");

        let far_away = GeoPoint::new(10.0, 10.0).unwrap();
        assert!(nearest_district(&districts, &far_away, 100.0).is_none());
    }

    #[test]
    fn unknown_locations_never_match() {
        let districts = vec![district("2799", 0.0, 0.0)];
        let origin = GeoPoint::default();
        assert!(nearest_district(&districts, &origin, 100.0).is_none());
    }
}
