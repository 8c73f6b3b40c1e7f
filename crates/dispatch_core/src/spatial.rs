//! Spatial operations: coordinates, great-circle distance and stepping.
//!
//! This module provides:
//!
//! - **GeoPoint**: latitude/longitude pair in degrees
//! - **Distance calculations**: haversine distance in miles
//! - **Coordinate validation**: boundary check used when loading reference data
//!
//! Distances use an idealized sphere of radius [`EARTH_RADIUS_MILES`]. Nothing in
//! here validates coordinate ranges; callers that ingest external data go through
//! [`validate_coordinates`] first.

use serde::{Deserialize, Serialize};

/// Radius of the idealized earth sphere, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3956.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Moves `fraction` of the way toward `target`, independently on each axis.
    ///
    /// This is a coordinate-space interpolation, not a geodesic midpoint.
    pub fn step_toward(self, target: GeoPoint, fraction: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (target.lat - self.lat) * fraction,
            lng: self.lng + (target.lng - self.lng) * fraction,
        }
    }

    pub fn distance_miles(self, other: GeoPoint) -> f64 {
        distance_miles(self, other)
    }
}

/// Haversine great-circle distance between two points, in miles.
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    // Clamp guards asin against h drifting past 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("coordinate is not a finite number: lat={lat}, lng={lng}")]
    NotFinite { lat: f64, lng: f64 },
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Validates a degree pair before it enters the simulation.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<GeoPoint, CoordinateError> {
    h3o::LatLng::new(lat, lng).map_err(|_| CoordinateError::NotFinite { lat, lng })?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CoordinateError::LongitudeOutOfRange(lng));
    }
    Ok(GeoPoint::new(lat, lng))
}
