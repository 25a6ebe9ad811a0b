//! Weather data model and display methods

use serde::{Deserialize, Serialize};

/// How Celsius readings are converted to Fahrenheit.
///
/// `Truncated` reproduces the historical output of the original tool, which
/// multiplied by an integer-divided `9 / 5` (that is, by `1`) and so reported
/// `celsius + 32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureConversion {
    /// `celsius * 9 / 5 + 32`
    #[default]
    Corrected,
    /// `celsius * (9 / 5) + 32` with integer division, i.e. `celsius + 32`
    Truncated,
}

impl TemperatureConversion {
    /// Convert a Celsius reading to Fahrenheit
    #[must_use]
    pub fn to_fahrenheit(self, celsius: f64) -> f64 {
        match self {
            TemperatureConversion::Corrected => celsius * 9.0 / 5.0 + 32.0,
            TemperatureConversion::Truncated => celsius * f64::from(9 / 5) + 32.0,
        }
    }
}

/// Wind sub-record; both fields are optional upstream
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct WindInfo {
    pub speed: Option<f64>,
    /// Compass direction such as `NNE`
    pub direction: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SunMoonInfo {
    pub sunrise: String,
    pub sunset: String,
    pub moonphase: f64,
}

/// Weather at a coordinate as reported by the aurora service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherInfo {
    /// Temperature in Fahrenheit
    pub temperature_f: f64,
    /// Cloud cover percentage
    pub cloud: f64,
    pub rain: f64,
    pub humidity: f64,
    pub fog: f64,
    /// Weather symbol code
    pub symbol: Option<i64>,
    pub wind: WindInfo,
    pub sun_and_moon: SunMoonInfo,
}

impl WeatherInfo {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°F", self.temperature_f)
    }

    /// Format wind information, `n/a` when the service omitted it
    #[must_use]
    pub fn format_wind(&self) -> String {
        match (&self.wind.speed, &self.wind.direction) {
            (Some(speed), Some(direction)) => format!("{speed} {direction}"),
            (Some(speed), None) => format!("{speed}"),
            (None, Some(direction)) => direction.clone(),
            (None, None) => "n/a".to_string(),
        }
    }
}
