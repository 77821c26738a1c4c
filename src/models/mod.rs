//! Data models for the clothing advisor
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geocoded places and coordinates
//! - Observation: Raw and validated current weather
//! - Recommendation: The clothing recommendation and its source flag

pub mod location;
pub mod observation;
pub mod recommendation;

pub use location::{Coordinates, Location};
pub use observation::{CurrentConditions, WeatherObservation, WeatherSnapshot};
pub use recommendation::{Advice, ClothingRecommendation, RecommendationSource};
