//! Recommendation strategy backed by a natural-language model

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::strategy::ClothingStrategy;
use crate::generative::{CompletionRequest, TextGenerator};
use crate::models::{ClothingRecommendation, RecommendationSource, WeatherObservation};

const SYSTEM_PROMPT: &str = "You are a professional clothing advisor. Your recommendations MUST match the exact weather conditions provided. Be specific and practical. Different weather conditions require different clothing. Always respond with valid JSON only.";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;

/// Asks a [`TextGenerator`] for a JSON recommendation
pub struct GenerativeStrategy {
    generator: Arc<dyn TextGenerator>,
}

/// All four keys are required; a missing key fails deserialization
#[derive(Debug, Deserialize)]
struct GeneratedRecommendation {
    layers: Vec<String>,
    accessories: Vec<String>,
    footwear: String,
    general_advice: Vec<String>,
}

impl GenerativeStrategy {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

/// Build the user prompt: the observation plus the binding guidelines
#[must_use]
pub fn build_prompt(observation: &WeatherObservation) -> String {
    format!(
        r#"You are a professional clothing advisor. Analyze these EXACT weather conditions and provide appropriate clothing recommendations:

CURRENT WEATHER CONDITIONS:
Temperature: {temperature}°C
Weather Condition: {description}
Wind Speed: {wind} km/h
Humidity: {humidity}%

IMPORTANT GUIDELINES:
- For temperatures BELOW 0°C: Recommend heavy winter gear (thermal underwear, heavy coat, insulated boots)
- For temperatures 0-10°C: Recommend medium layers (sweater, medium coat, closed shoes)
- For temperatures 10-20°C: Recommend light layers (t-shirt, light jacket, comfortable shoes)
- For temperatures ABOVE 20°C: Recommend light clothing (t-shirt, shorts, sandals/light shoes)
- For RAIN/DRIZZLE: MUST include waterproof jacket, umbrella, waterproof footwear
- For SNOW: MUST include heavy winter coat, waterproof boots, warm accessories
- For HIGH WIND (>20 km/h): MUST include windbreaker
- For CLEAR/SUNNY weather with temp >20°C: MUST include sunglasses, hat, sunscreen

Respond with ONLY a JSON object (no markdown, no code blocks):
{{
    "layers": ["specific clothing item 1", "specific clothing item 2"],
    "accessories": ["specific accessory 1", "specific accessory 2"],
    "footwear": "specific footwear recommendation",
    "general_advice": ["specific advice 1", "specific advice 2"]
}}

Base your recommendations STRICTLY on the temperature and weather conditions provided above."#,
        temperature = observation.temperature_celsius,
        description = observation.description,
        wind = observation.wind_speed_kmh,
        humidity = observation.humidity_percent,
    )
}

/// Remove a surrounding markdown code fence, with or without a `json` tag
#[must_use]
pub fn strip_code_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let Some(fenced) = reply.strip_prefix("```") else {
        return reply;
    };
    let body = fenced.split("```").next().unwrap_or(fenced);
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Parse and validate a model reply; `None` on any defect
#[must_use]
pub fn parse_reply(reply: &str) -> Option<ClothingRecommendation> {
    let generated: GeneratedRecommendation = match serde_json::from_str(strip_code_fence(reply)) {
        Ok(generated) => generated,
        Err(e) => {
            debug!("Generative reply is not a valid recommendation: {}", e);
            return None;
        }
    };

    let recommendation = ClothingRecommendation {
        layers: generated.layers,
        accessories: generated.accessories.into_iter().collect(),
        footwear: generated.footwear,
        general_advice: generated.general_advice,
    };

    if !recommendation.is_complete() {
        debug!("Generative reply is missing layers or footwear");
        return None;
    }
    Some(recommendation)
}

#[async_trait]
impl ClothingStrategy for GenerativeStrategy {
    fn source(&self) -> RecommendationSource {
        RecommendationSource::Generative
    }

    async fn attempt(&self, observation: &WeatherObservation) -> Option<ClothingRecommendation> {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_prompt(observation),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let reply = match self.generator.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Generative backend failed ({}), using fallback recommendations", e);
                return None;
            }
        };

        let parsed = parse_reply(&reply);
        if parsed.is_none() {
            warn!("Generative backend returned an unusable recommendation, using fallback");
        }
        parsed
    }
}
