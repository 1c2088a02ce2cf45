use crate::poi::Poi;

/// Builds the text fed to the embedding encoder for one candidate.
///
/// Field order and separators are fixed: the same [`Poi`] always produces a
/// byte-identical string, so embeddings are reproducible across requests.
pub fn describe(poi: &Poi) -> String {
	format!(
		"{}. Cuisine: {}. Opening hours: {}. Located at coordinates {}, {}. City: {}. Street: {}. \
		 Neighborhood: {}. Amenity: {}.",
		poi.name,
		poi.cuisine,
		poi.opening_hours,
		poi.lat,
		poi.lon,
		poi.city,
		poi.street,
		poi.neighborhood,
		poi.amenity,
	)
}
