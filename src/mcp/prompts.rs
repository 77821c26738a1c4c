//! Text rendering for the `weather_advice` prompt

use crate::service::CityAdvice;

pub const DEFAULT_ACTIVITY: &str = "general outdoor activity";

fn bullets(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    items
        .into_iter()
        .map(|item| format!("  - {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Weather summary, clothing list and activity questions for an assistant
#[must_use]
pub fn weather_advice(city: &str, activity: &str, advice: &CityAdvice) -> String {
    let weather = &advice.weather.weather;
    let clothing = &advice.clothing;

    format!(
        "Based on current weather in {city}, provide advice for: {activity}

Weather Conditions:
- Temperature: {temperature}°C
- Conditions: {conditions}
- Wind Speed: {wind} km/h
- Humidity: {humidity}%

Clothing Recommendations:
Layers:
{layers}

Accessories:
{accessories}

Footwear: {footwear}

General Advice:
{general_advice}

Please provide:
1. Is the weather suitable for {activity}?
2. What precautions should be taken?
3. What is the best time of day for this activity?
4. Any alternative suggestions if conditions aren't ideal?",
        temperature = weather.temperature,
        conditions = weather.weather_description,
        wind = weather.wind_speed,
        humidity = weather.humidity,
        layers = bullets(&clothing.layers),
        accessories = bullets(&clothing.accessories),
        footwear = clothing.footwear,
        general_advice = bullets(&clothing.general_advice),
    )
}
