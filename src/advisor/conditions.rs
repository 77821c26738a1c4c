//! Classification of observations into the categories the rules act on

/// WMO codes for drizzle, rain and rain showers
pub const RAIN_CODES: [u8; 9] = [51, 53, 55, 61, 63, 65, 80, 81, 82];
/// WMO codes for snow fall, snow grains and snow showers
pub const SNOW_CODES: [u8; 6] = [71, 73, 75, 77, 85, 86];
/// WMO codes for thunderstorms, with or without hail
pub const THUNDERSTORM_CODES: [u8; 3] = [95, 96, 99];
/// WMO codes counted as clear or sunny
pub const CLEAR_CODES: [u8; 2] = [0, 1];

/// Wind speed above which a windbreaker is required
pub const STRONG_WIND_KMH: f64 = 20.0;
/// Temperature above which clear weather calls for sun protection
pub const SUN_PROTECTION_CELSIUS: f64 = 20.0;

/// Temperature bands; each lower bound is inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    /// Below 0°C
    Freezing,
    /// 0°C up to 10°C
    Cold,
    /// 10°C up to 20°C
    Mild,
    /// 20°C and above
    Warm,
}

/// Precipitation category of a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precipitation {
    Rain,
    Snow,
    Thunderstorm,
    None,
}

impl TemperatureBand {
    #[must_use]
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature < 0.0 {
            TemperatureBand::Freezing
        } else if temperature < 10.0 {
            TemperatureBand::Cold
        } else if temperature < 20.0 {
            TemperatureBand::Mild
        } else {
            TemperatureBand::Warm
        }
    }
}

impl Precipitation {
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        if RAIN_CODES.contains(&code) {
            Precipitation::Rain
        } else if SNOW_CODES.contains(&code) {
            Precipitation::Snow
        } else if THUNDERSTORM_CODES.contains(&code) {
            Precipitation::Thunderstorm
        } else {
            Precipitation::None
        }
    }
}

#[must_use]
pub fn is_clear(code: u8) -> bool {
    CLEAR_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-20.0, TemperatureBand::Freezing)]
    #[case(-0.1, TemperatureBand::Freezing)]
    #[case(0.0, TemperatureBand::Cold)]
    #[case(9.9, TemperatureBand::Cold)]
    #[case(10.0, TemperatureBand::Mild)]
    #[case(19.9, TemperatureBand::Mild)]
    #[case(20.0, TemperatureBand::Warm)]
    #[case(38.0, TemperatureBand::Warm)]
    fn test_temperature_band_boundaries(#[case] temperature: f64, #[case] expected: TemperatureBand) {
        assert_eq!(TemperatureBand::from_celsius(temperature), expected);
    }

    #[rstest]
    #[case(51, Precipitation::Rain)]
    #[case(65, Precipitation::Rain)]
    #[case(82, Precipitation::Rain)]
    #[case(71, Precipitation::Snow)]
    #[case(86, Precipitation::Snow)]
    #[case(95, Precipitation::Thunderstorm)]
    #[case(99, Precipitation::Thunderstorm)]
    #[case(0, Precipitation::None)]
    #[case(45, Precipitation::None)]
    // freezing drizzle/rain are not in any category
    #[case(56, Precipitation::None)]
    #[case(66, Precipitation::None)]
    fn test_precipitation_categories(#[case] code: u8, #[case] expected: Precipitation) {
        assert_eq!(Precipitation::from_code(code), expected);
    }

    #[test]
    fn test_clear_codes() {
        assert!(is_clear(0));
        assert!(is_clear(1));
        assert!(!is_clear(2));
        assert!(!is_clear(3));
    }
}
