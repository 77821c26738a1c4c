//! Strategy abstraction and the first-success combinator

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::rules::RuleStrategy;
use crate::models::{Advice, ClothingRecommendation, RecommendationSource, WeatherObservation};

/// A way of deriving a recommendation that may decline to answer
#[async_trait]
pub trait ClothingStrategy: Send + Sync {
    /// Diagnostic flag reported when this strategy's answer is used
    fn source(&self) -> RecommendationSource;

    /// `None` means "no usable answer", never an error for the caller
    async fn attempt(&self, observation: &WeatherObservation) -> Option<ClothingRecommendation>;
}

/// Tries candidates in order; the first answer wins
///
/// The rule strategy is the terminal element, so [`FirstSuccess::resolve`]
/// always produces a recommendation.
#[derive(Clone, Default)]
pub struct FirstSuccess {
    candidates: Vec<Arc<dyn ClothingStrategy>>,
    terminal: RuleStrategy,
}

impl FirstSuccess {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate tried before the rule strategy
    #[must_use]
    pub fn then(mut self, strategy: Arc<dyn ClothingStrategy>) -> Self {
        self.candidates.push(strategy);
        self
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub async fn resolve(&self, observation: &WeatherObservation) -> Advice {
        for candidate in &self.candidates {
            match candidate.attempt(observation).await {
                Some(recommendation) => {
                    return Advice {
                        recommendation,
                        source: candidate.source(),
                    };
                }
                None => debug!("{} strategy declined, trying next", candidate.source()),
            }
        }

        Advice {
            recommendation: self.terminal.evaluate(observation),
            source: RecommendationSource::Rules,
        }
    }
}
