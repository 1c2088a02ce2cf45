use serde::{Deserialize, Serialize};
use serde_json::Value;

use savor_domain::ScoredPoi;

use crate::{Error, RecommendItem, RecommendRequest, RecommendService, Result};

/// Returned verbatim when the fetch finds nothing; the model is not called.
pub const EMPTY_RESULT_REPLY: &str = "Sorry, I couldn't find any restaurants nearby.";

const SYSTEM_PROMPT: &str = "You are a restaurant recommendation assistant.\n\
	Rules:\n\
	- Do not use Markdown.\n\
	- Do not invent information.\n\
	- Use simple natural language.\n\
	- Only use the details given to you.\n\
	- Do not create details that are not given to you.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
	pub query: String,
	pub lat: f64,
	pub lon: f64,
	pub radius_m: Option<u32>,
	pub top_k: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
	pub response: String,
	pub results: Vec<RecommendItem>,
}

impl RecommendService {
	/// The explanation path: identical ranking pipeline, then one narrative
	/// generation call over the already-ranked top-k. The numeric ordering is
	/// never revisited.
	pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
		let ChatRequest { query, lat, lon, radius_m, top_k } = req;
		let recommend_req = RecommendRequest { query: query.clone(), lat, lon, radius_m, top_k };
		let ranked = self.rank_candidates(&recommend_req).await?;

		if ranked.is_empty() {
			return Ok(ChatResponse {
				response: EMPTY_RESULT_REPLY.to_string(),
				results: Vec::new(),
			});
		}

		let messages = build_chat_messages(&query, &ranked);
		let narrative = self
			.providers
			.chat
			.generate(&self.cfg.providers.llm, &messages)
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;

		Ok(ChatResponse {
			response: narrative,
			results: ranked.into_iter().map(RecommendItem::from).collect(),
		})
	}
}

fn build_chat_messages(query: &str, ranked: &[ScoredPoi]) -> Vec<Value> {
	let restaurant_list = ranked.iter().map(summary_line).collect::<Vec<_>>().join("\n");
	let user_prompt = format!(
		"I want food like: '{query}'.\n\nHere are nearby restaurants:\n{restaurant_list}\n\n\
		 Select the best options and explain why each was chosen.\n\
		 Do not add details that are not included above."
	);

	vec![
		serde_json::json!({ "role": "system", "content": SYSTEM_PROMPT }),
		serde_json::json!({ "role": "user", "content": user_prompt }),
	]
}

fn summary_line(candidate: &ScoredPoi) -> String {
	format!(
		"- {} ({}), {:.1} km, score {:.2}, hours: {}",
		candidate.poi.name,
		candidate.poi.cuisine,
		candidate.distance_km,
		candidate.final_score,
		candidate.poi.opening_hours,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use savor_domain::{Poi, poi::UNKNOWN};

	fn candidate(name: &str, cuisine: &str, distance_km: f64, final_score: f32) -> ScoredPoi {
		ScoredPoi {
			poi: Poi {
				id: 1,
				name: name.to_string(),
				cuisine: cuisine.to_string(),
				opening_hours: "Mo-Su 10:00-22:00".to_string(),
				lat: 0.0,
				lon: 0.0,
				city: UNKNOWN.to_string(),
				street: UNKNOWN.to_string(),
				house_number: UNKNOWN.to_string(),
				neighborhood: UNKNOWN.to_string(),
				amenity: "restaurant".to_string(),
			},
			semantic_score: 0.5,
			distance_km,
			distance_score: 0.5,
			final_score,
		}
	}

	#[test]
	fn summary_line_carries_the_ranked_facts() {
		let line = summary_line(&candidate("Pho Corner", "vietnamese", 1.23, 0.812));

		assert_eq!(line, "- Pho Corner (vietnamese), 1.2 km, score 0.81, hours: Mo-Su 10:00-22:00");
	}

	#[test]
	fn chat_messages_pair_system_rules_with_candidates() {
		let ranked =
			vec![candidate("Pho Corner", "vietnamese", 1.2, 0.8), candidate("Taco Town", "mexican", 2.0, 0.6)];
		let messages = build_chat_messages("spicy noodles", &ranked);

		assert_eq!(messages.len(), 2);
		assert_eq!(messages[0]["role"], "system");
		assert_eq!(messages[1]["role"], "user");

		let user = messages[1]["content"].as_str().unwrap();

		assert!(user.contains("spicy noodles"));
		assert!(user.contains("Pho Corner"));
		assert!(user.contains("Taco Town"));
	}
}
