//! Deterministic clothing rules
//!
//! A recommendation is built by threading a [`Draft`] through [`RULES`] in
//! order. Each rule is a pure function of the draft and the observation, so
//! later rules can override earlier choices (precipitation replaces the
//! footwear picked by the temperature band) and every rule can be tested on
//! its own.

use async_trait::async_trait;
use std::collections::BTreeSet;

use super::conditions::{
    Precipitation, STRONG_WIND_KMH, SUN_PROTECTION_CELSIUS, TemperatureBand, is_clear,
};
use super::strategy::ClothingStrategy;
use crate::models::{ClothingRecommendation, RecommendationSource, WeatherObservation};

/// Footwear used before any rule has run
pub const DEFAULT_FOOTWEAR: &str = "Regular shoes";

/// Partial recommendation threaded through the rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub layers: Vec<String>,
    pub accessories: BTreeSet<String>,
    pub footwear: String,
    pub advice: Vec<String>,
}

/// A single rule: takes the draft so far and returns the updated draft
pub type Rule = fn(Draft, &WeatherObservation) -> Draft;

/// Rules in evaluation order
pub const RULES: [(&str, Rule); 4] = [
    ("temperature", temperature_band),
    ("wind", wind_protection),
    ("precipitation", precipitation),
    ("sun", sun_protection),
];

impl Default for Draft {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            accessories: BTreeSet::new(),
            footwear: DEFAULT_FOOTWEAR.to_string(),
            advice: Vec::new(),
        }
    }
}

impl Draft {
    fn with_layers(mut self, layers: &[&str]) -> Self {
        self.layers = layers.iter().map(|layer| (*layer).to_string()).collect();
        self
    }

    fn with_accessories(mut self, accessories: &[&str]) -> Self {
        self.accessories
            .extend(accessories.iter().map(|item| (*item).to_string()));
        self
    }

    fn with_footwear(mut self, footwear: &str) -> Self {
        self.footwear = footwear.to_string();
        self
    }

    fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice.push(advice.into());
        self
    }

    #[must_use]
    pub fn finish(self) -> ClothingRecommendation {
        ClothingRecommendation {
            layers: self.layers,
            accessories: self.accessories,
            footwear: self.footwear,
            general_advice: self.advice,
        }
    }
}

/// Base layers, footwear and advice for the temperature band
#[must_use]
pub fn temperature_band(draft: Draft, observation: &WeatherObservation) -> Draft {
    match TemperatureBand::from_celsius(observation.temperature_celsius) {
        TemperatureBand::Freezing => draft
            .with_layers(&[
                "Thermal underwear",
                "Warm sweater or fleece",
                "Heavy winter coat",
            ])
            .with_accessories(&["Warm hat", "Insulated gloves", "Scarf"])
            .with_footwear("Insulated winter boots")
            .with_advice("Dress in multiple layers to trap warmth"),
        TemperatureBand::Cold => draft
            .with_layers(&["Long-sleeve shirt", "Sweater or light jacket", "Medium coat"])
            .with_accessories(&["Light hat or beanie", "Light gloves"])
            .with_footwear("Closed-toe shoes or boots")
            .with_advice("A light jacket should be sufficient"),
        TemperatureBand::Mild => draft
            .with_layers(&["T-shirt or long-sleeve shirt", "Light jacket or cardigan"])
            .with_footwear("Comfortable shoes or sneakers")
            .with_advice("Pleasant temperature, light layers recommended"),
        TemperatureBand::Warm => draft
            .with_layers(&["T-shirt or light shirt", "Optional: light cardigan"])
            .with_footwear("Sandals, sneakers, or light shoes")
            .with_advice("Warm weather, dress lightly and stay hydrated"),
    }
}

/// Windbreaker above the strong-wind threshold
#[must_use]
pub fn wind_protection(draft: Draft, observation: &WeatherObservation) -> Draft {
    if observation.wind_speed_kmh <= STRONG_WIND_KMH {
        return draft;
    }
    draft
        .with_accessories(&["Windbreaker or wind-resistant jacket"])
        .with_advice(format!(
            "Strong winds at {:?} km/h - wear wind-resistant clothing",
            observation.wind_speed_kmh
        ))
}

/// Rain, snow and thunderstorm gear; at most one category applies
#[must_use]
pub fn precipitation(draft: Draft, observation: &WeatherObservation) -> Draft {
    match Precipitation::from_code(observation.weather_code) {
        Precipitation::Rain => draft
            .with_accessories(&["Umbrella", "Raincoat or waterproof jacket"])
            .with_footwear("Waterproof shoes or boots")
            .with_advice("Rain expected - bring waterproof gear"),
        Precipitation::Snow => draft
            .with_accessories(&["Waterproof gloves"])
            .with_footwear("Waterproof insulated boots")
            .with_advice("Snow conditions - wear waterproof footwear"),
        Precipitation::Thunderstorm => draft
            .with_accessories(&["Waterproof jacket"])
            .with_advice("Thunderstorm conditions - stay indoors if possible"),
        Precipitation::None => draft,
    }
}

/// Sun protection for clear and hot weather
#[must_use]
pub fn sun_protection(draft: Draft, observation: &WeatherObservation) -> Draft {
    if is_clear(observation.weather_code)
        && observation.temperature_celsius > SUN_PROTECTION_CELSIUS
    {
        draft.with_accessories(&["Sunglasses", "Sunscreen", "Hat for sun protection"])
    } else {
        draft
    }
}

/// Run every rule in order and produce the final recommendation
#[must_use]
pub fn evaluate(observation: &WeatherObservation) -> ClothingRecommendation {
    RULES
        .iter()
        .fold(Draft::default(), |draft, (_, rule)| rule(draft, observation))
        .finish()
}

/// The always-available rule strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleStrategy;

impl RuleStrategy {
    #[must_use]
    pub fn evaluate(&self, observation: &WeatherObservation) -> ClothingRecommendation {
        evaluate(observation)
    }
}

#[async_trait]
impl ClothingStrategy for RuleStrategy {
    fn source(&self) -> RecommendationSource {
        RecommendationSource::Rules
    }

    async fn attempt(&self, observation: &WeatherObservation) -> Option<ClothingRecommendation> {
        Some(evaluate(observation))
    }
}
