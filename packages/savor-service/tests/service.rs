use std::sync::Arc;

use savor_domain::{
	Coordinates,
	geo::haversine_km,
	poi::UNKNOWN,
};
use savor_service::{
	ChatProvider, ChatRequest, EmbeddingProvider, Error, PoiSource, Providers, RecommendRequest,
	RecommendService, chat::EMPTY_RESULT_REPLY,
};
use savor_testkit::{
	FailingEmbedding, FailingPois, HashEmbedding, SpyChat, StaticPois, StubChat, poi, test_config,
};

const DIM: u32 = 384;

fn service_with(
	pois: Arc<dyn PoiSource>,
	embedding: Arc<dyn EmbeddingProvider>,
	chat: Arc<dyn ChatProvider>,
) -> RecommendService {
	RecommendService::with_providers(test_config(DIM), Providers::new(pois, embedding, chat))
}

fn default_service(candidates: Vec<savor_domain::Poi>) -> RecommendService {
	service_with(
		Arc::new(StaticPois { pois: candidates }),
		Arc::new(HashEmbedding { dimensions: DIM }),
		Arc::new(StubChat { reply: "Here is my pick.".to_string() }),
	)
}

fn five_candidates() -> Vec<savor_domain::Poi> {
	vec![
		poi(1, "Spicy Noodles", "noodles", 40.001, -73.001),
		poi(2, "Green Salad Bar", "salad", 40.01, -73.01),
		poi(3, "Taco Town", "mexican", 40.02, -73.0),
		poi(4, "Burger Bay", "burger", 40.03, -73.03),
		poi(5, "Sushi Spot", "sushi", 40.04, -73.0),
	]
}

fn spicy_noodles_request() -> RecommendRequest {
	RecommendRequest {
		query: "spicy noodles".to_string(),
		lat: 40.0,
		lon: -73.0,
		radius_m: Some(5_000),
		top_k: Some(3),
	}
}

#[tokio::test]
async fn example_scenario_returns_three_ordered_results() {
	let service = default_service(five_candidates());
	let response = service.recommend(spicy_noodles_request()).await.expect("recommend failed");
	let results = response.results;

	assert_eq!(results.len(), 3);
	assert_eq!(results[0].name, "Spicy Noodles");

	for pair in results.windows(2) {
		assert!(pair[0].final_score >= pair[1].final_score);
	}

	let user = Coordinates { lat: 40.0, lon: -73.0 };

	for item in &results {
		let expected = haversine_km(user, Coordinates { lat: item.lat, lon: item.lon });

		assert!((item.distance_km - expected).abs() < 0.01);
		assert!((-1.0..=1.0).contains(&item.semantic_score));
		assert!((0.0..=1.0).contains(&item.distance_score));
	}
}

#[tokio::test]
async fn empty_candidate_set_yields_an_empty_response() {
	let service = default_service(Vec::new());
	let response = service.recommend(spicy_noodles_request()).await.expect("recommend failed");

	assert!(response.results.is_empty());
}

#[tokio::test]
async fn validation_runs_before_any_fetch() {
	let pois = Arc::new(FailingPois::new());
	let calls = pois.calls.clone();
	let service = service_with(
		pois,
		Arc::new(HashEmbedding { dimensions: DIM }),
		Arc::new(StubChat { reply: String::new() }),
	);

	let empty_query = RecommendRequest { query: "  ".to_string(), ..spicy_noodles_request() };
	assert!(matches!(
		service.recommend(empty_query).await,
		Err(Error::InvalidRequest { .. })
	));

	let bad_lat = RecommendRequest { lat: 91.0, ..spicy_noodles_request() };
	assert!(matches!(service.recommend(bad_lat).await, Err(Error::InvalidRequest { .. })));

	let nan_lon = RecommendRequest { lon: f64::NAN, ..spicy_noodles_request() };
	assert!(matches!(service.recommend(nan_lon).await, Err(Error::InvalidRequest { .. })));

	assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_failure_surfaces_as_an_error() {
	let service = service_with(
		Arc::new(FailingPois::new()),
		Arc::new(HashEmbedding { dimensions: DIM }),
		Arc::new(StubChat { reply: String::new() }),
	);

	assert!(matches!(
		service.recommend(spicy_noodles_request()).await,
		Err(Error::Upstream { .. })
	));
}

#[tokio::test]
async fn embedding_failure_is_fatal_for_the_request() {
	let service = service_with(
		Arc::new(StaticPois { pois: five_candidates() }),
		Arc::new(FailingEmbedding),
		Arc::new(StubChat { reply: String::new() }),
	);

	assert!(matches!(
		service.recommend(spicy_noodles_request()).await,
		Err(Error::Provider { .. })
	));
}

#[tokio::test]
async fn pipeline_is_deterministic_across_runs() {
	let service = default_service(five_candidates());
	let first = service.recommend(spicy_noodles_request()).await.expect("recommend failed");
	let second = service.recommend(spicy_noodles_request()).await.expect("recommend failed");

	let first_names: Vec<&str> = first.results.iter().map(|item| item.name.as_str()).collect();
	let second_names: Vec<&str> = second.results.iter().map(|item| item.name.as_str()).collect();

	assert_eq!(first_names, second_names);

	for (a, b) in first.results.iter().zip(second.results.iter()) {
		assert_eq!(a.final_score, b.final_score);
	}
}

#[tokio::test]
async fn candidates_missing_fields_still_rank() {
	let mut lone = poi(9, "Mystery Kitchen", UNKNOWN, 40.002, -73.002);

	lone.opening_hours = UNKNOWN.to_string();

	let service = default_service(vec![lone]);
	let response = service.recommend(spicy_noodles_request()).await.expect("recommend failed");

	assert_eq!(response.results.len(), 1);
	assert_eq!(response.results[0].opening_hours, UNKNOWN);
	assert!(response.results[0].final_score.is_finite());
}

#[tokio::test]
async fn top_k_defaults_apply_when_omitted() {
	let mut candidates = five_candidates();

	candidates.push(poi(6, "Extra Eats", "fusion", 40.005, -73.005));
	candidates.push(poi(7, "Seventh Seat", "fusion", 40.006, -73.006));

	let service = default_service(candidates);
	let request = RecommendRequest { top_k: None, ..spicy_noodles_request() };
	let response = service.recommend(request).await.expect("recommend failed");

	// test_config sets default_top_k = 5.
	assert_eq!(response.results.len(), 5);
}

#[tokio::test]
async fn chat_preserves_the_recommend_ordering() {
	let service = default_service(five_candidates());
	let recommend = service.recommend(spicy_noodles_request()).await.expect("recommend failed");
	let chat = service
		.chat(ChatRequest {
			query: "spicy noodles".to_string(),
			lat: 40.0,
			lon: -73.0,
			radius_m: Some(5_000),
			top_k: Some(3),
		})
		.await
		.expect("chat failed");

	assert_eq!(chat.response, "Here is my pick.");

	let recommend_names: Vec<&str> =
		recommend.results.iter().map(|item| item.name.as_str()).collect();
	let chat_names: Vec<&str> = chat.results.iter().map(|item| item.name.as_str()).collect();

	assert_eq!(recommend_names, chat_names);
}

#[tokio::test]
async fn chat_with_no_candidates_never_calls_the_model() {
	let chat_provider = Arc::new(SpyChat::new("unused"));
	let calls = chat_provider.calls.clone();
	let service = service_with(
		Arc::new(StaticPois { pois: Vec::new() }),
		Arc::new(HashEmbedding { dimensions: DIM }),
		chat_provider,
	);
	let response = service
		.chat(ChatRequest {
			query: "anything".to_string(),
			lat: 40.0,
			lon: -73.0,
			radius_m: None,
			top_k: None,
		})
		.await
		.expect("chat failed");

	assert_eq!(response.response, EMPTY_RESULT_REPLY);
	assert!(response.results.is_empty());
	assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}
