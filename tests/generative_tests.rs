//! Integration tests for the OpenAI-compatible generator and the fallback path.

use std::sync::Arc;

use clothing_advisor::{
    ClothingAdvisor, CompletionRequest, GenerationError, OpenAiGenerator, RecommendationSource,
    TextGenerator, WeatherObservation,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn generator_for(server: &MockServer) -> Arc<dyn TextGenerator> {
    Arc::new(OpenAiGenerator::new(&server.uri(), "gpt-4o-mini", "sk-test-key", 5).unwrap())
}

fn rainy() -> WeatherObservation {
    WeatherObservation::new(15.0, 30.0, 90, 61, "Slight rain").unwrap()
}

#[tokio::test]
async fn test_completion_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "max_tokens": 20
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Light drizzle \n")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CompletionRequest {
        system: "system".to_string(),
        user: "user".to_string(),
        temperature: 0.3,
        max_tokens: 20,
    };
    let reply = generator_for(&mock_server).complete(&request).await.unwrap();

    assert_eq!(reply, "Light drizzle");
}

#[tokio::test]
async fn test_unauthorized_is_status_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let request = CompletionRequest {
        system: "system".to_string(),
        user: "user".to_string(),
        temperature: 0.3,
        max_tokens: 20,
    };
    let result = generator_for(&mock_server).complete(&request).await;

    assert!(matches!(result, Err(GenerationError::Status(401))));
}

#[tokio::test]
async fn test_fenced_reply_is_used() {
    let mock_server = MockServer::start().await;
    let reply = "```json\n{\"layers\": [\"Light rain jacket\"], \"accessories\": [\"Umbrella\", \"Umbrella\"], \"footwear\": \"Waterproof sneakers\", \"general_advice\": [\"Expect showers\"]}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
        .mount(&mock_server)
        .await;

    let advice = ClothingAdvisor::new(Some(generator_for(&mock_server)))
        .advise(&rainy())
        .await;

    assert_eq!(advice.source, RecommendationSource::Generative);
    assert_eq!(advice.recommendation.layers, ["Light rain jacket"]);
    assert_eq!(advice.recommendation.accessories.len(), 1);
    assert_eq!(advice.recommendation.footwear, "Waterproof sneakers");
}

#[tokio::test]
async fn test_backend_failure_falls_back_to_rules() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let advisor = ClothingAdvisor::new(Some(generator_for(&mock_server)));
    let advice = advisor.advise(&rainy()).await;

    assert_eq!(advice.source, RecommendationSource::Rules);
    assert_eq!(
        advice.recommendation,
        ClothingAdvisor::rules_only().recommend(&rainy()).await
    );
}

#[tokio::test]
async fn test_malformed_reply_falls_back_to_rules() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{\"layers\": [\"Coat\"], \"footwear\": \"Boots\"}")),
        )
        .mount(&mock_server)
        .await;

    let advice = ClothingAdvisor::new(Some(generator_for(&mock_server)))
        .advise(&rainy())
        .await;

    assert_eq!(advice.source, RecommendationSource::Rules);
    assert_eq!(advice.recommendation.footwear, "Waterproof shoes or boots");
}

#[tokio::test]
async fn test_description_uses_backend_then_table() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Gentle rain")))
        .mount(&mock_server)
        .await;

    let with_backend = ClothingAdvisor::new(Some(generator_for(&mock_server)));
    assert_eq!(with_backend.resolve_description(61).await, "Gentle rain");

    let offline = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&offline)
        .await;
    let failing = ClothingAdvisor::new(Some(generator_for(&offline)));
    assert_eq!(failing.resolve_description(61).await, "Slight rain");
}
