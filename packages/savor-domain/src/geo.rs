use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
	pub lat: f64,
	pub lon: f64,
}

/// The bounding region a candidate fetch covers: a center point and a radius
/// in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRegion {
	pub center: Coordinates,
	pub radius_m: u32,
}

/// Great-circle distance between two coordinates in kilometers, via the
/// haversine formula.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
	let dlat = (b.lat - a.lat).to_radians();
	let dlon = (b.lon - a.lon).to_radians();
	let h = (dlat / 2.0).sin().powi(2)
		+ a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
	let c = 2.0 * h.sqrt().asin();

	EARTH_RADIUS_KM * c
}

/// Maps a distance to a closeness score in `[0, 1]`.
///
/// Linear decay over the fetch radius: 1.0 at zero distance, 0.0 at or
/// beyond `radius_m`. Callers guarantee a positive radius.
pub fn distance_score(distance_km: f64, radius_m: u32) -> f32 {
	let radius_km = f64::from(radius_m) / 1_000.0;

	(1.0 - distance_km / radius_km).clamp(0.0, 1.0) as f32
}
