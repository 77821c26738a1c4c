//! Clothing recommendation model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What to wear for a given observation
///
/// Serializes to `{layers, accessories, footwear, general_advice}`, the shape
/// consumed by the web page and tool clients. Accessories are a set; the
/// ordered set keeps serialization stable across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingRecommendation {
    pub layers: Vec<String>,
    pub accessories: BTreeSet<String>,
    pub footwear: String,
    pub general_advice: Vec<String>,
}

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// The natural-language model answered with a usable recommendation
    Generative,
    /// The deterministic rule set
    Rules,
}

/// A recommendation together with its diagnostic source flag
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub recommendation: ClothingRecommendation,
    pub source: RecommendationSource,
}

impl ClothingRecommendation {
    /// Whether the recommendation satisfies the non-empty layers/footwear invariant
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.layers.is_empty()
            && self.layers.iter().all(|layer| !layer.trim().is_empty())
            && !self.footwear.trim().is_empty()
    }

    #[must_use]
    pub fn has_accessory(&self, accessory: &str) -> bool {
        self.accessories.contains(accessory)
    }
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationSource::Generative => write!(f, "generative"),
            RecommendationSource::Rules => write!(f, "rules"),
        }
    }
}
