use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(GeoPoint { lat, lng })
    }

    /// Shift this point by raw degree offsets.
    /// Returns `None` if the result leaves the valid coordinate range.
    pub fn offset(&self, lat_deg: f64, lng_deg: f64) -> Option<GeoPoint> {
        GeoPoint::new(self.lat + lat_deg, self.lng + lng_deg).ok()
    }
}

/// Formats as `lat,lng`, the form directions providers accept for waypoints.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(-23.1791, -45.8872).is_ok());
        assert!(GeoPoint::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(GeoPoint::new(0.0, 181.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_offset_stays_in_range() {
        let p = GeoPoint::new(89.99, 0.0).unwrap();
        assert!(p.offset(0.02, 0.0).is_none());

        let shifted = p.offset(-0.01, 0.5).unwrap();
        assert!((shifted.lat - 89.98).abs() < 1e-9);
        assert!((shifted.lng - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_display_is_lat_comma_lng() {
        let p = GeoPoint::new(-23.5, -45.25).unwrap();
        assert_eq!(p.to_string(), "-23.5,-45.25");
    }
}
