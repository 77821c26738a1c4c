use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{
    AdvisorError,
    models::{ClothingRecommendation, Coordinates, WeatherSnapshot},
    service::AdvisoryService,
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

fn default_activity() -> String {
    "general outdoor activities".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CityRequest {
    pub city: String,
    #[serde(default = "default_activity")]
    pub activity: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub city: String,
    pub coordinates: Coordinates,
    pub weather: WeatherSnapshot,
    pub clothing: ClothingRecommendation,
    pub activity: String,
}

/// Error body `{"detail": ...}` with a status derived from the error kind
pub struct ApiError(AdvisorError);

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AdvisorError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdvisorError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "detail": self.0.user_message() }))).into_response()
    }
}

pub fn router(service: Arc<AdvisoryService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/weather", post(get_weather_recommendation))
        .route("/api/health", get(health_check))
        .with_state(service)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_weather_recommendation(
    State(service): State<Arc<AdvisoryService>>,
    Json(request): Json<CityRequest>,
) -> Result<Json<WeatherResponse>, ApiError> {
    info!("Weather request for '{}' ({})", request.city, request.activity);
    let advice = service.advise(&request.city).await?;

    Ok(Json(WeatherResponse {
        city: request.city,
        coordinates: advice.weather.location.coordinates(),
        weather: advice.weather.weather,
        clothing: advice.clothing,
        activity: request.activity,
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "message": "Weather API is running" }))
}
