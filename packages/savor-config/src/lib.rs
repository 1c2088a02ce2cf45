mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, LlmProviderConfig, Overpass, Providers, Retrieval, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.overpass.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "overpass.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.overpass.amenities.is_empty() {
		return Err(Error::Validation {
			message: "overpass.amenities must be non-empty.".to_string(),
		});
	}
	if cfg.overpass.amenities.iter().any(|amenity| amenity.trim().is_empty()) {
		return Err(Error::Validation {
			message: "overpass.amenities entries must be non-empty.".to_string(),
		});
	}
	if cfg.overpass.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "overpass.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if !cfg.providers.llm.temperature.is_finite() || cfg.providers.llm.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be a finite number of zero or greater."
				.to_string(),
		});
	}
	if cfg.providers.llm.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.llm.max_tokens must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("llm", &cfg.providers.llm.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if cfg.retrieval.max_radius_m == 0 {
		return Err(Error::Validation {
			message: "retrieval.max_radius_m must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.default_radius_m == 0
		|| cfg.retrieval.default_radius_m > cfg.retrieval.max_radius_m
	{
		return Err(Error::Validation {
			message: "retrieval.default_radius_m must be in the range 1..=retrieval.max_radius_m."
				.to_string(),
		});
	}
	if cfg.retrieval.max_top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.max_top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.default_top_k == 0 || cfg.retrieval.default_top_k > cfg.retrieval.max_top_k {
		return Err(Error::Validation {
			message: "retrieval.default_top_k must be in the range 1..=retrieval.max_top_k."
				.to_string(),
		});
	}

	Ok(())
}
