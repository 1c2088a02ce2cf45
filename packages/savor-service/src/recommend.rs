use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use savor_domain::{
	Coordinates, ScoredPoi, SearchRegion, descriptor,
	geo::{self, haversine_km},
	ranking,
};
use savor_index::{FlatIndex, l2_normalize};

use crate::{Error, RecommendService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
	pub query: String,
	pub lat: f64,
	pub lon: f64,
	pub radius_m: Option<u32>,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendItem {
	pub name: String,
	pub cuisine: String,
	pub amenity: String,
	pub opening_hours: String,
	pub city: String,
	pub street: String,
	pub neighborhood: String,
	pub lat: f64,
	pub lon: f64,
	pub semantic_score: f32,
	pub distance_km: f64,
	pub distance_score: f32,
	pub final_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
	pub results: Vec<RecommendItem>,
}

impl RecommendService {
	pub async fn recommend(&self, req: RecommendRequest) -> Result<RecommendResponse> {
		let ranked = self.rank_candidates(&req).await?;

		Ok(RecommendResponse { results: ranked.into_iter().map(RecommendItem::from).collect() })
	}

	/// Runs the retrieval pipeline end to end: validate, fetch, describe,
	/// embed, index, query, score, fuse, truncate. The candidate set, the
	/// embeddings, and the index all live and die inside this call.
	pub(crate) async fn rank_candidates(&self, req: &RecommendRequest) -> Result<Vec<ScoredPoi>> {
		validate_request(req)?;

		let retrieval = &self.cfg.retrieval;
		let radius_m =
			req.radius_m.unwrap_or(retrieval.default_radius_m).clamp(1, retrieval.max_radius_m);
		let top_k = req.top_k.unwrap_or(retrieval.default_top_k).clamp(1, retrieval.max_top_k);
		let center = Coordinates { lat: req.lat, lon: req.lon };
		let request_id = Uuid::new_v4();

		let pois = self
			.providers
			.pois
			.fetch(&self.cfg.overpass, SearchRegion { center, radius_m })
			.await
			.map_err(|err| Error::Upstream { message: err.to_string() })?;

		if pois.is_empty() {
			info!(%request_id, radius_m, "No candidates within the search radius.");

			return Ok(Vec::new());
		}

		let descriptions: Vec<String> = pois.iter().map(descriptor::describe).collect();
		let mut embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &descriptions)
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;

		if embeddings.len() != pois.len() {
			return Err(Error::Provider {
				message: "Embedding provider returned mismatched vector count.".to_string(),
			});
		}

		let dim = self.cfg.providers.embedding.dimensions as usize;
		let mut index = FlatIndex::new(dim)?;

		for vector in &mut embeddings {
			if vector.len() != dim {
				return Err(Error::Provider {
					message: "Embedding vector dimension mismatch.".to_string(),
				});
			}

			l2_normalize(vector);
		}
		for vector in embeddings {
			index.add(vector)?;
		}

		let query_vector = self.embed_query(&req.query, dim).await?;
		let hits = index.search(&query_vector)?;
		// Hits arrive sorted by similarity; scatter them back to fetch order
		// so ties in the fused ranking stay deterministic.
		let mut semantic_scores = vec![0.0_f32; index.len()];

		for hit in hits {
			semantic_scores[hit.index] = hit.score;
		}

		let mut scored = Vec::with_capacity(pois.len());

		for (poi, semantic_score) in pois.into_iter().zip(semantic_scores) {
			let distance_km = haversine_km(center, Coordinates { lat: poi.lat, lon: poi.lon });
			let distance_score = geo::distance_score(distance_km, radius_m);
			let final_score = ranking::fuse(semantic_score, distance_score);

			scored.push(ScoredPoi { poi, semantic_score, distance_km, distance_score, final_score });
		}

		let ranked = ranking::rank(scored, top_k as usize);

		info!(%request_id, results = ranked.len(), top_k, "Ranked candidate set.");

		Ok(ranked)
	}

	async fn embed_query(&self, query: &str, dim: usize) -> Result<Vec<f32>> {
		let embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&query.to_string()))
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;
		let mut vector = embeddings.into_iter().next().ok_or_else(|| Error::Provider {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		if vector.len() != dim {
			return Err(Error::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		l2_normalize(&mut vector);

		Ok(vector)
	}
}

fn validate_request(req: &RecommendRequest) -> Result<()> {
	if req.query.trim().is_empty() {
		return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
	}
	if !(-90.0..=90.0).contains(&req.lat) {
		return Err(Error::InvalidRequest {
			message: "lat must be a finite number in the range -90.0..=90.0.".to_string(),
		});
	}
	if !(-180.0..=180.0).contains(&req.lon) {
		return Err(Error::InvalidRequest {
			message: "lon must be a finite number in the range -180.0..=180.0.".to_string(),
		});
	}

	Ok(())
}

impl From<ScoredPoi> for RecommendItem {
	fn from(scored: ScoredPoi) -> Self {
		let ScoredPoi { poi, semantic_score, distance_km, distance_score, final_score } = scored;

		Self {
			name: poi.name,
			cuisine: poi.cuisine,
			amenity: poi.amenity,
			opening_hours: poi.opening_hours,
			city: poi.city,
			street: poi.street,
			neighborhood: poi.neighborhood,
			lat: poi.lat,
			lon: poi.lon,
			semantic_score,
			distance_km,
			distance_score,
			final_score,
		}
	}
}
