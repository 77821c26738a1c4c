//! Weather code descriptions
//!
//! A generator, when configured, phrases the condition; otherwise the fixed
//! WMO table answers.

use std::sync::Arc;
use tracing::debug;

use crate::generative::{CompletionRequest, TextGenerator};

/// Description for codes missing from the table
pub const UNKNOWN_CONDITION: &str = "Unknown weather condition";

const SYSTEM_PROMPT: &str = "You are a weather expert. Convert WMO weather codes to brief, natural weather descriptions. Respond with only the weather description, no extra text.";

/// Fixed WMO code table
#[must_use]
pub fn describe_code(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_CONDITION,
    }
}

/// Resolves weather codes to descriptions, generator first
#[derive(Clone, Default)]
pub struct DescriptionResolver {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl DescriptionResolver {
    #[must_use]
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Never fails: generator errors and empty replies fall back to the table
    pub async fn resolve(&self, code: u8) -> String {
        let Some(generator) = &self.generator else {
            return describe_code(code).to_string();
        };

        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "What is the weather condition for WMO code {code}? Provide a brief 2-4 word description."
            ),
            temperature: 0.3,
            max_tokens: 20,
        };

        match generator.complete(&request).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => {
                debug!("Empty description for weather code {}, using table", code);
                describe_code(code).to_string()
            }
            Err(e) => {
                debug!("Description lookup failed for code {}: {}", code, e);
                describe_code(code).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generative::GenerationError;
    use async_trait::async_trait;
    use rstest::rstest;

    struct Reply(Result<String, GenerationError>);

    #[async_trait]
    impl TextGenerator for Reply {
        async fn complete(&self, _: &CompletionRequest) -> Result<String, GenerationError> {
            self.0.clone()
        }
    }

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(3, "Overcast")]
    #[case(45, "Foggy")]
    #[case(48, "Depositing rime fog")]
    #[case(77, "Snow grains")]
    #[case(82, "Violent rain showers")]
    #[case(99, "Thunderstorm with heavy hail")]
    #[case(12, "Unknown weather condition")]
    #[case(56, "Unknown weather condition")]
    fn test_describe_code(#[case] code: u8, #[case] expected: &str) {
        assert_eq!(describe_code(code), expected);
    }

    #[test]
    fn test_table_covers_every_defined_code() {
        let defined = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95, 96,
            99,
        ];
        let known = (0..=99u8)
            .filter(|code| describe_code(*code) != UNKNOWN_CONDITION)
            .collect::<Vec<_>>();
        assert_eq!(known, defined);
    }

    #[tokio::test]
    async fn test_resolver_without_generator_uses_table() {
        let resolver = DescriptionResolver::default();
        assert_eq!(resolver.resolve(61).await, "Slight rain");
        assert_eq!(resolver.resolve(61).await, resolver.resolve(61).await);
    }

    #[tokio::test]
    async fn test_resolver_trims_generated_text() {
        let resolver =
            DescriptionResolver::new(Some(Arc::new(Reply(Ok("  Light rain showers \n".into())))));
        assert_eq!(resolver.resolve(80).await, "Light rain showers");
    }

    #[tokio::test]
    async fn test_resolver_falls_back_on_error_or_empty_reply() {
        let failing = DescriptionResolver::new(Some(Arc::new(Reply(Err(
            GenerationError::Timeout(30),
        )))));
        assert_eq!(failing.resolve(95).await, "Thunderstorm");

        let empty = DescriptionResolver::new(Some(Arc::new(Reply(Ok("   ".into())))));
        assert_eq!(empty.resolve(12).await, "Unknown weather condition");
    }
}
