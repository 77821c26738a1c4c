//! Weather and geocoding client for `OpenMeteo`
//!
//! No API key is required. Requests go through retry middleware so transient
//! upstream failures are retried with exponential backoff.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::{CurrentConditions, Location};
use crate::{AdvisorError, Result};

pub mod open_meteo;

/// Source of locations and current weather
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Resolve a city name to its best-matching location
    async fn geocode(&self, city: &str) -> Result<Location>;

    /// Fetch current conditions at a location
    async fn current_conditions(&self, location: &Location) -> Result<CurrentConditions>;
}

/// HTTP client for the `OpenMeteo` geocoding and forecast APIs
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    geocoding_base_url: String,
    forecast_base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("clothing-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdvisorError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("OpenMeteo API request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AdvisorError::api(format!("Request to OpenMeteo failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::api(format!("OpenMeteo returned HTTP {status}")));
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| AdvisorError::api(format!("Invalid response from OpenMeteo: {e}")))?;

        let elapsed = start_time.elapsed();
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }
        Ok(parsed)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Location> {
        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_base_url,
            urlencoding::encode(city)
        );

        let response: open_meteo::GeocodingResponse = self.get_json(&url).await?;
        let location: Location = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| AdvisorError::not_found(city))?
            .into();

        info!(
            "Geocoded '{}' to {} ({})",
            city,
            location.name,
            location.format_coordinates()
        );
        Ok(location)
    }

    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn current_conditions(&self, location: &Location) -> Result<CurrentConditions> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current={}&temperature_unit=celsius&wind_speed_unit=kmh",
            self.forecast_base_url,
            location.latitude,
            location.longitude,
            open_meteo::CURRENT_FIELDS
        );

        let response: open_meteo::ForecastResponse = self.get_json(&url).await?;
        let current = response.current.ok_or_else(|| {
            AdvisorError::api(format!(
                "No current weather data available for {}",
                location.format_coordinates()
            ))
        })?;

        info!(
            "Current weather at {}: {:.1}°C, code {}",
            location.name, current.temperature_2m, current.weather_code
        );
        Ok(current)
    }
}
