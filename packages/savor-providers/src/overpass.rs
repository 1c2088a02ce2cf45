use std::{fmt::Write, time::Duration};

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use savor_domain::{Poi, SearchRegion, poi::UNKNOWN};

/// Server-side evaluation budget carried inside the Overpass QL header.
const QUERY_TIMEOUT_S: u32 = 20;

/// Fetches food-related points of interest around the region center.
///
/// Overpass only accepts the query as a POST body. Anything other than a
/// well-formed JSON `elements` payload is an error; the caller decides how to
/// surface it.
pub async fn fetch(cfg: &savor_config::Overpass, region: SearchRegion) -> Result<Vec<Poi>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let query = build_query(&cfg.amenities, region);
	let res = client.post(&cfg.api_base).body(query).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_overpass_response(json)
}

fn build_query(amenities: &[String], region: SearchRegion) -> String {
	let mut clauses = String::new();
	for amenity in amenities {
		let _ = writeln!(
			clauses,
			"  node[\"amenity\"=\"{}\"](around:{},{},{});",
			amenity, region.radius_m, region.center.lat, region.center.lon,
		);
	}

	format!("[out:json][timeout:{QUERY_TIMEOUT_S}];\n(\n{clauses});\nout center;\n")
}

fn parse_overpass_response(json: Value) -> Result<Vec<Poi>> {
	let elements = json
		.get("elements")
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Overpass response is missing elements array."))?;

	Ok(elements.iter().filter_map(parse_element).collect())
}

// Only named entries are kept; the encoder needs a textual identifier.
fn parse_element(element: &Value) -> Option<Poi> {
	let tags = element.get("tags")?;
	let name = tags.get("name").and_then(|v| v.as_str())?;
	let (lat, lon) = coordinates(element)?;
	let id = element.get("id").and_then(|v| v.as_i64()).unwrap_or_default();

	Some(Poi {
		id,
		name: name.to_string(),
		cuisine: tag_or_unknown(tags, "cuisine"),
		opening_hours: tag_or_unknown(tags, "opening_hours"),
		lat,
		lon,
		city: tag_or_unknown(tags, "addr:city"),
		street: tag_or_unknown(tags, "addr:street"),
		house_number: tag_or_unknown(tags, "addr:housenumber"),
		neighborhood: tag_or_unknown(tags, "addr:suburb"),
		amenity: tag_or_unknown(tags, "amenity"),
	})
}

// Nodes carry lat/lon at the top level; ways only carry a computed "center".
fn coordinates(element: &Value) -> Option<(f64, f64)> {
	let direct = element
		.get("lat")
		.and_then(Value::as_f64)
		.zip(element.get("lon").and_then(Value::as_f64));

	if direct.is_some() {
		return direct;
	}

	let center = element.get("center")?;

	center.get("lat").and_then(Value::as_f64).zip(center.get("lon").and_then(Value::as_f64))
}

fn tag_or_unknown(tags: &Value, key: &str) -> String {
	tags.get(key)
		.and_then(|v| v.as_str())
		.filter(|value| !value.trim().is_empty())
		.unwrap_or(UNKNOWN)
		.to_string()
}
