//! City-level advisory service
//!
//! Resolves a city, fetches its current weather, describes the weather code
//! and runs the recommendation engine. Shared by the HTTP API, the tool
//! server and the CLI.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::advisor::ClothingAdvisor;
use crate::models::{
    ClothingRecommendation, Location, RecommendationSource, WeatherObservation, WeatherSnapshot,
};
use crate::weather::WeatherSource;
use crate::{AdvisorError, Result};

/// Current weather for a city
#[derive(Debug, Clone, Serialize)]
pub struct CityWeather {
    pub city: String,
    pub location: Location,
    pub weather: WeatherSnapshot,
    #[serde(skip)]
    pub observation: WeatherObservation,
}

/// Current weather for a city plus what to wear
#[derive(Debug, Clone, Serialize)]
pub struct CityAdvice {
    #[serde(flatten)]
    pub weather: CityWeather,
    pub clothing: ClothingRecommendation,
    pub source: RecommendationSource,
}

pub struct AdvisoryService {
    weather: Arc<dyn WeatherSource>,
    advisor: ClothingAdvisor,
}

impl AdvisoryService {
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherSource>, advisor: ClothingAdvisor) -> Self {
        Self { weather, advisor }
    }

    #[must_use]
    pub fn advisor(&self) -> &ClothingAdvisor {
        &self.advisor
    }

    /// Geocode a city and fetch its current weather
    pub async fn current_weather(&self, city: &str) -> Result<CityWeather> {
        let city = city.trim();
        if city.is_empty() {
            return Err(AdvisorError::validation("City name is required"));
        }

        debug!("Looking up weather for '{}'", city);
        let location = self.weather.geocode(city).await?;
        let current = self.weather.current_conditions(&location).await?;

        let code = u8::try_from(current.weather_code)
            .ok()
            .filter(|code| *code <= 99)
            .ok_or_else(|| {
                AdvisorError::api(format!(
                    "Weather code {} is outside 0-99",
                    current.weather_code
                ))
            })?;
        let description = self.advisor.resolve_description(code).await;
        let observation = WeatherObservation::from_current(&current, description)?;

        Ok(CityWeather {
            city: city.to_string(),
            location,
            weather: WeatherSnapshot::from(&observation),
            observation,
        })
    }

    /// Current weather plus a clothing recommendation
    pub async fn advise(&self, city: &str) -> Result<CityAdvice> {
        let weather = self.current_weather(city).await?;
        let advice = self.advisor.advise(&weather.observation).await;

        info!(
            "Recommendation for {} from {} strategy",
            weather.city, advice.source
        );

        Ok(CityAdvice {
            weather,
            clothing: advice.recommendation,
            source: advice.source,
        })
    }
}
