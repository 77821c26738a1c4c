//! Weather observation model
//!
//! `WeatherObservation` is the engine's input. It is built from the raw
//! Open-Meteo `current` block once the weather code has been described.

use serde::{Deserialize, Serialize};

use crate::{AdvisorError, Result};

/// Raw current-conditions block as returned by the forecast API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature at 2 m in Celsius
    pub temperature_2m: f64,
    /// Wind speed at 10 m in km/h
    pub wind_speed_10m: f64,
    /// Relative humidity at 2 m in percent
    pub relative_humidity_2m: f64,
    /// WMO weather code
    pub weather_code: i64,
}

/// Validated weather observation for a single location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_celsius: f64,
    pub wind_speed_kmh: f64,
    pub humidity_percent: u8,
    /// WMO weather code (0-99)
    pub weather_code: u8,
    pub description: String,
}

/// Presentation shape of an observation, shared by the HTTP API and tool server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub wind_speed: f64,
    pub humidity: u8,
    pub weather_code: u8,
    pub weather_description: String,
}

impl WeatherObservation {
    /// Create an observation, rejecting out-of-range values
    pub fn new(
        temperature_celsius: f64,
        wind_speed_kmh: f64,
        humidity_percent: u8,
        weather_code: u8,
        description: impl Into<String>,
    ) -> Result<Self> {
        let observation = Self {
            temperature_celsius,
            wind_speed_kmh,
            humidity_percent,
            weather_code,
            description: description.into(),
        };
        observation.validate()?;
        Ok(observation)
    }

    /// Normalize raw API fields into an observation
    pub fn from_current(current: &CurrentConditions, description: impl Into<String>) -> Result<Self> {
        let humidity = current.relative_humidity_2m.round();
        if !(0.0..=100.0).contains(&humidity) {
            return Err(AdvisorError::validation(format!(
                "Humidity {} is outside 0-100%",
                current.relative_humidity_2m
            )));
        }
        let weather_code = u8::try_from(current.weather_code).map_err(|_| {
            AdvisorError::validation(format!("Weather code {} is outside 0-99", current.weather_code))
        })?;

        Self::new(
            current.temperature_2m,
            current.wind_speed_10m,
            humidity as u8,
            weather_code,
            description,
        )
    }

    /// Check the invariants the recommendation engine relies on
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_celsius.is_finite() {
            return Err(AdvisorError::validation("Temperature must be a finite number"));
        }
        if !self.wind_speed_kmh.is_finite() || self.wind_speed_kmh < 0.0 {
            return Err(AdvisorError::validation(format!(
                "Wind speed {} km/h must be a non-negative number",
                self.wind_speed_kmh
            )));
        }
        if self.humidity_percent > 100 {
            return Err(AdvisorError::validation(format!(
                "Humidity {}% is outside 0-100%",
                self.humidity_percent
            )));
        }
        if self.weather_code > 99 {
            return Err(AdvisorError::validation(format!(
                "Weather code {} is outside 0-99",
                self.weather_code
            )));
        }
        Ok(())
    }
}

impl From<&WeatherObservation> for WeatherSnapshot {
    fn from(observation: &WeatherObservation) -> Self {
        Self {
            temperature: observation.temperature_celsius,
            wind_speed: observation.wind_speed_kmh,
            humidity: observation.humidity_percent,
            weather_code: observation.weather_code,
            weather_description: observation.description.clone(),
        }
    }
}
