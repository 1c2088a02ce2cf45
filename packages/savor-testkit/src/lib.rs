//! Deterministic fakes for the provider seams, so pipeline tests run without
//! any network or model runtime.

use std::{
	hash::{DefaultHasher, Hash, Hasher},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use color_eyre::eyre;
use serde_json::{Map, Value};

use savor_config::{
	Config, EmbeddingProviderConfig, LlmProviderConfig, Overpass, Providers, Retrieval, Service,
};
use savor_domain::{Poi, SearchRegion, poi::UNKNOWN};
use savor_service::{BoxFuture, ChatProvider, EmbeddingProvider, PoiSource};

/// Serves a fixed candidate set regardless of the requested region.
pub struct StaticPois {
	pub pois: Vec<Poi>,
}
impl PoiSource for StaticPois {
	fn fetch<'a>(
		&'a self,
		_cfg: &'a Overpass,
		_region: SearchRegion,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Poi>>> {
		let pois = self.pois.clone();

		Box::pin(async move { Ok(pois) })
	}
}

/// Fails every fetch, for upstream-error paths. The call counter also proves
/// when validation rejected a request before any fetch happened.
pub struct FailingPois {
	pub calls: Arc<AtomicUsize>,
}
impl FailingPois {
	pub fn new() -> Self {
		Self { calls: Arc::new(AtomicUsize::new(0)) }
	}
}
impl Default for FailingPois {
	fn default() -> Self {
		Self::new()
	}
}
impl PoiSource for FailingPois {
	fn fetch<'a>(
		&'a self,
		_cfg: &'a Overpass,
		_region: SearchRegion,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Poi>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move { Err(eyre::eyre!("Overpass unreachable.")) })
	}
}

/// Bag-of-tokens pseudo-embeddings: each token hashes into one bucket. The
/// same text always produces the same vector, alone or inside a batch, and
/// texts sharing tokens get a positive inner product.
pub struct HashEmbedding {
	pub dimensions: u32,
}
impl EmbeddingProvider for HashEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		let dimensions = self.dimensions as usize;
		let vectors = texts.iter().map(|text| token_vector(text, dimensions)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

/// Fails every encode call, for fatal-provider paths.
pub struct FailingEmbedding;
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Err(eyre::eyre!("Model failed to load.")) })
	}
}

/// Returns a canned narrative.
pub struct StubChat {
	pub reply: String,
}
impl ChatProvider for StubChat {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		let reply = self.reply.clone();

		Box::pin(async move { Ok(reply) })
	}
}

/// Counts generation calls on top of a canned narrative.
pub struct SpyChat {
	pub reply: String,
	pub calls: Arc<AtomicUsize>,
}
impl SpyChat {
	pub fn new(reply: &str) -> Self {
		Self { reply: reply.to_string(), calls: Arc::new(AtomicUsize::new(0)) }
	}
}
impl ChatProvider for SpyChat {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let reply = self.reply.clone();

		Box::pin(async move { Ok(reply) })
	}
}

pub fn poi(id: i64, name: &str, cuisine: &str, lat: f64, lon: f64) -> Poi {
	Poi {
		id,
		name: name.to_string(),
		cuisine: cuisine.to_string(),
		opening_hours: "Mo-Su 10:00-22:00".to_string(),
		lat,
		lon,
		city: "New York".to_string(),
		street: UNKNOWN.to_string(),
		house_number: UNKNOWN.to_string(),
		neighborhood: UNKNOWN.to_string(),
		amenity: "restaurant".to_string(),
	}
}

pub fn test_config(dimensions: u32) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		overpass: Overpass {
			api_base: "http://127.0.0.1:1".to_string(),
			amenities: vec!["restaurant".to_string(), "cafe".to_string()],
			timeout_ms: 1_000,
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test".to_string(),
				dimensions,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			llm: LlmProviderConfig {
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test".to_string(),
				temperature: 0.3,
				max_tokens: 350,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		retrieval: Retrieval {
			default_radius_m: 1_000,
			max_radius_m: 25_000,
			default_top_k: 5,
			max_top_k: 50,
		},
	}
}

fn token_vector(text: &str, dimensions: usize) -> Vec<f32> {
	let mut vector = vec![0.0_f32; dimensions];

	for token in text.to_lowercase().split(|ch: char| !ch.is_ascii_alphanumeric()) {
		if token.is_empty() {
			continue;
		}

		let mut hasher = DefaultHasher::new();

		token.hash(&mut hasher);

		let bucket = (hasher.finish() % dimensions as u64) as usize;

		vector[bucket] += 1.0;
	}

	vector
}
