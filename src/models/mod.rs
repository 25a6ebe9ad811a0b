//! Data models for the aurorawx client
//!
//! This module contains the typed records built from remote responses:
//! - Location: zip code geocoding result
//! - Weather: weather at a coordinate, with wind and sun/moon sub-records
//! - Image: aurora image catalog entries and categories

pub mod image;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use image::{ImageCategory, ImageEntry};
pub use location::LocationInfo;
pub use weather::{SunMoonInfo, TemperatureConversion, WeatherInfo, WindInfo};
