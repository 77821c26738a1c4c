//! Clothing advisor - what to wear for the current weather
//!
//! This library turns a current weather observation into a clothing
//! recommendation. A generative backend is tried first when configured and a
//! deterministic rule set always answers when it is not.

pub mod advisor;
pub mod api;
pub mod config;
pub mod error;
pub mod generative;
pub mod mcp;
pub mod models;
pub mod service;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisor::{ClothingAdvisor, describe_code};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
pub use generative::{CompletionRequest, GenerationError, OpenAiGenerator, TextGenerator};
pub use mcp::McpServer;
pub use models::{
    Advice, ClothingRecommendation, Location, RecommendationSource, WeatherObservation,
    WeatherSnapshot,
};
pub use service::{AdvisoryService, CityAdvice, CityWeather};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Rule-based recommendation for an observation, without any backend
pub async fn recommend(observation: &WeatherObservation) -> ClothingRecommendation {
    ClothingAdvisor::rules_only().recommend(observation).await
}
