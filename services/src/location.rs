//! Geofence math: great-circle distance and the radius admit/reject decision.

/// WGS84 equatorial radius in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Outcome of checking a claimed position against a session's geofence.
///
/// The distance is computed and carried on both outcomes so callers can echo
/// it to the user whether the check passed or failed.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCheck {
    pub within_range: bool,
    pub distance_m: i64,
    pub allowed_radius_m: i32,
    pub message: String,
}

/// Great-circle (haversine) distance in meters between two coordinates on a
/// spherical earth.
pub fn haversine_distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// True when both values are inside the valid latitude/longitude ranges.
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// Decides whether a student position is inside the session geofence.
///
/// The comparison is inclusive: a position exactly `allowed_radius_m` meters
/// from the anchor passes. Distance is rounded to the nearest whole meter
/// before comparing, matching what gets stored on the record.
pub fn validate_location(
    session_lat: f64,
    session_lng: f64,
    allowed_radius_m: i32,
    student_lat: f64,
    student_lng: f64,
) -> LocationCheck {
    let distance_m =
        haversine_distance_m(session_lat, session_lng, student_lat, student_lng).round() as i64;
    let within_range = distance_m <= i64::from(allowed_radius_m);

    let message = if within_range {
        format!("Location verified ({distance_m}m from session location)")
    } else {
        format!(
            "You are {distance_m}m away from the session location. Maximum allowed: {allowed_radius_m}m"
        )
    };

    LocationCheck {
        within_range,
        distance_m,
        allowed_radius_m,
        message,
    }
}
