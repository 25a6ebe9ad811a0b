//! `aurorawx` - aurora imagery and zip code weather lookups
//!
//! This library provides the clients for the Auroras.live API and the
//! zipcodeapi.com geocoding API, the mapping of their JSON responses into
//! typed records, and the service that chains a zip code lookup into a
//! weather lookup.

pub mod aurora;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod http;
pub mod mapper;
pub mod models;
pub mod query;
pub mod service;

// Re-export core types for public API
pub use aurora::AuroraClient;
pub use clock::{LocalOffset, OffsetSource, StaticOffset};
pub use config::AuroraConfig;
pub use error::AuroraError;
pub use geo::ZipCodeClient;
pub use models::{
    ImageCategory, ImageEntry, LocationInfo, SunMoonInfo, TemperatureConversion, WeatherInfo,
    WindInfo,
};
pub use query::QueryBuilder;
pub use service::{AuroraService, ZipForecast};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AuroraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
