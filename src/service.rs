//! Service facade composing the zip code and aurora clients
//!
//! One client per remote host is constructed up front and reused for every
//! call made through the service.

use std::path::PathBuf;

use rand::RngExt;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::aurora::AuroraClient;
use crate::config::AuroraConfig;
use crate::geo::ZipCodeClient;
use crate::models::{ImageEntry, LocationInfo, WeatherInfo};
use crate::Result;

/// Location and weather resolved for a zip code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipForecast {
    pub location: LocationInfo,
    pub weather: WeatherInfo,
}

pub struct AuroraService<R = ThreadRng> {
    zipcodes: ZipCodeClient,
    aurora: AuroraClient<R>,
}

impl AuroraService<ThreadRng> {
    /// Build both clients from configuration
    pub fn new(config: &AuroraConfig) -> Result<Self> {
        Ok(Self::from_clients(
            ZipCodeClient::new(&config.zipcode)?,
            AuroraClient::new(config)?,
        ))
    }
}

impl<R: RngExt> AuroraService<R> {
    pub fn from_clients(zipcodes: ZipCodeClient, aurora: AuroraClient<R>) -> Self {
        Self { zipcodes, aurora }
    }

    /// Resolve a zip code to its location and the weather there.
    ///
    /// A failed location lookup aborts before any weather request is made.
    #[instrument(skip(self))]
    pub fn forecast_for_zip(&self, zip_code: &str) -> Result<ZipForecast> {
        let location = self.zipcodes.lookup_location(zip_code)?;
        debug!(
            "Looking up weather for {} at {}",
            zip_code,
            location.format_coordinates()
        );
        let weather = self
            .aurora
            .weather_for_coordinates(location.latitude, location.longitude)?;

        Ok(ZipForecast { location, weather })
    }

    /// Weather for a zip code, discarding the intermediate location
    pub fn weather_for_zip(&self, zip_code: &str) -> Result<WeatherInfo> {
        self.forecast_for_zip(zip_code).map(|forecast| forecast.weather)
    }

    pub fn lookup_location(&self, zip_code: &str) -> Result<LocationInfo> {
        self.zipcodes.lookup_location(zip_code)
    }

    pub fn weather_for_coordinates(&self, latitude: f64, longitude: f64) -> Result<WeatherInfo> {
        self.aurora.weather_for_coordinates(latitude, longitude)
    }

    pub fn list_images(&self) -> Result<Vec<ImageEntry>> {
        self.aurora.list_images()
    }

    pub fn list_image_ids(&self, category: Option<&str>) -> Result<Vec<String>> {
        self.aurora.list_image_ids(category)
    }

    pub fn download_image(&mut self, image_id: &str) -> Result<PathBuf> {
        self.aurora.download_image(image_id)
    }

    pub fn download_random_image(&mut self) -> Result<PathBuf> {
        self.aurora.download_random_image()
    }
}
