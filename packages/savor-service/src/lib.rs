pub mod chat;
pub mod recommend;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use chat::{ChatRequest, ChatResponse};
pub use error::{Error, Result};
pub use recommend::{RecommendItem, RecommendRequest, RecommendResponse};

use savor_config::{Config, EmbeddingProviderConfig, LlmProviderConfig, Overpass};
use savor_domain::{Poi, SearchRegion};
use savor_providers::{chat as chat_provider, embedding, overpass};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait PoiSource
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		cfg: &'a Overpass,
		region: SearchRegion,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Poi>>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub pois: Arc<dyn PoiSource>,
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub chat: Arc<dyn ChatProvider>,
}

/// Process-wide retrieval state: configuration plus provider handles, built
/// once at startup and read-only afterwards. Every request runs the pipeline
/// against its own candidate set, so the service needs no interior locking.
pub struct RecommendService {
	pub cfg: Config,
	pub providers: Providers,
}

struct DefaultProviders;

impl PoiSource for DefaultProviders {
	fn fetch<'a>(
		&'a self,
		cfg: &'a Overpass,
		region: SearchRegion,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Poi>>> {
		Box::pin(overpass::fetch(cfg, region))
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl ChatProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(chat_provider::generate(cfg, messages))
	}
}

impl Providers {
	pub fn new(
		pois: Arc<dyn PoiSource>,
		embedding: Arc<dyn EmbeddingProvider>,
		chat: Arc<dyn ChatProvider>,
	) -> Self {
		Self { pois, embedding, chat }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { pois: provider.clone(), embedding: provider.clone(), chat: provider }
	}
}

impl RecommendService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
