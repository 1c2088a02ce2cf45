use serde::{Deserialize, Serialize};

/// Placeholder carried by string fields the data source did not provide.
pub const UNKNOWN: &str = "unknown";

/// A single food-related point of interest, as normalized from the data
/// source. String fields never hold an empty value; absent tags are filled
/// with [`UNKNOWN`] so descriptors stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
	pub id: i64,
	pub name: String,
	pub cuisine: String,
	pub opening_hours: String,
	pub lat: f64,
	pub lon: f64,
	pub city: String,
	pub street: String,
	pub house_number: String,
	pub neighborhood: String,
	pub amenity: String,
}
