//! Clothing recommendation engine
//!
//! This module converts a weather observation into a clothing recommendation:
//! - Rules: the deterministic rule set, always available
//! - Generative: a natural-language model strategy tried first when configured
//! - Strategy: the strategy trait and the first-success combinator
//! - Description: weather code to text, with the same dual path

pub mod conditions;
pub mod description;
pub mod generative;
pub mod rules;
pub mod strategy;

use std::sync::Arc;
use tracing::{debug, info};

pub use description::{DescriptionResolver, describe_code};
pub use generative::GenerativeStrategy;
pub use rules::RuleStrategy;
pub use strategy::{ClothingStrategy, FirstSuccess};

use crate::config::GenerativeConfig;
use crate::generative::{OpenAiGenerator, TextGenerator};
use crate::models::{Advice, ClothingRecommendation, WeatherObservation};

/// Entry point of the engine, shared across requests
#[derive(Clone, Default)]
pub struct ClothingAdvisor {
    strategies: FirstSuccess,
    descriptions: DescriptionResolver,
}

impl ClothingAdvisor {
    /// Engine with an optional generator; `None` means rules only
    #[must_use]
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let strategies = match &generator {
            Some(generator) => {
                FirstSuccess::new().then(Arc::new(GenerativeStrategy::new(generator.clone())))
            }
            None => FirstSuccess::new(),
        };
        Self {
            strategies,
            descriptions: DescriptionResolver::new(generator),
        }
    }

    /// Engine that never calls a generative backend
    #[must_use]
    pub fn rules_only() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GenerativeConfig) -> anyhow::Result<Self> {
        let generator = OpenAiGenerator::from_config(config)?;
        match &generator {
            Some(_) => info!("Generative backend enabled (model {})", config.model),
            None => info!("No generative backend configured, using rule-based recommendations"),
        }
        Ok(Self::new(
            generator.map(|generator| Arc::new(generator) as Arc<dyn TextGenerator>),
        ))
    }

    #[must_use]
    pub fn has_generator(&self) -> bool {
        self.strategies.candidate_count() > 0
    }

    /// Recommendation for an observation; never fails
    pub async fn recommend(&self, observation: &WeatherObservation) -> ClothingRecommendation {
        self.advise(observation).await.recommendation
    }

    /// Recommendation plus the strategy that produced it
    pub async fn advise(&self, observation: &WeatherObservation) -> Advice {
        let advice = self.strategies.resolve(observation).await;
        debug!(
            "Recommendation for {:.1}°C / code {} produced by {} strategy",
            observation.temperature_celsius, observation.weather_code, advice.source
        );
        advice
    }

    /// Description of a WMO weather code; never fails
    pub async fn resolve_description(&self, code: u8) -> String {
        self.descriptions.resolve(code).await
    }
}
