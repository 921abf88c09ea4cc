//! Geolocation seam.
//!
//! Provider integration (Nominatim or similar) stays an external
//! collaborator; the services only depend on this trait. Lookup
//! failures are soft: callers treat them as "no address resolved".

use crate::Result;

/// Reverse-geocoding capability.
pub trait Geocoder: Send + Sync {
    /// Resolves a street address for the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails. An unknown location
    /// is `Ok(None)`.
    fn reverse_address(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;

    /// Resolves an administrative district for the given coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails. An unknown location
    /// is `Ok(None)`.
    fn district(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine).
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        assert!(distance_km(55.75, 37.61, 55.75, 37.61) < 1e-9);
    }

    #[test]
    fn test_distance_moscow_to_spb() {
        // Moscow to Saint Petersburg is roughly 635 km.
        let d = distance_km(55.7558, 37.6173, 59.9343, 30.3351);
        assert!((d - 635.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = distance_km(55.75, 37.61, 59.93, 30.33);
        let b = distance_km(59.93, 30.33, 55.75, 37.61);
        assert!((a - b).abs() < 1e-9);
    }
}
