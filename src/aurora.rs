//! Auroras.live API client
//!
//! Weather by coordinates, the image catalog, and image downloads. Every
//! request carries a `tz` parameter read from the configured
//! [`OffsetSource`] at request time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::RngExt;
use rand::rngs::ThreadRng;
use reqwest::blocking::Client;
use tracing::{debug, info, instrument, warn};

use crate::clock::{LocalOffset, OffsetSource, StaticOffset};
use crate::config::AuroraConfig;
use crate::http;
use crate::mapper;
use crate::models::{ImageCategory, ImageEntry, TemperatureConversion, WeatherInfo};
use crate::query::QueryBuilder;
use crate::{AuroraError, Result};

/// Random bytes appended (hex encoded) to downloaded file names
const SUFFIX_BYTES: usize = 5;

/// Client for the aurora imagery and weather endpoints
pub struct AuroraClient<R = ThreadRng> {
    client: Client,
    base_url: String,
    api_version: String,
    offset: Box<dyn OffsetSource>,
    conversion: TemperatureConversion,
    download_dir: PathBuf,
    rng: R,
}

impl AuroraClient<ThreadRng> {
    /// Create a client backed by the thread-local RNG
    pub fn new(config: &AuroraConfig) -> Result<Self> {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: RngExt> AuroraClient<R> {
    /// Create a client with an injected randomness source.
    ///
    /// A seeded RNG makes random image selection and download file names
    /// reproducible.
    pub fn with_rng(config: &AuroraConfig, rng: R) -> Result<Self> {
        let offset: Box<dyn OffsetSource> = match config.aurora.tz_offset_seconds {
            Some(seconds) => Box::new(StaticOffset(seconds)),
            None => Box::new(LocalOffset),
        };

        Ok(Self {
            client: http::build_client(config.aurora.timeout_seconds)?,
            base_url: config.aurora.base_url.clone(),
            api_version: config.aurora.api_version.clone(),
            offset,
            conversion: config.aurora.temperature_conversion,
            download_dir: config.downloads.directory.clone(),
            rng,
        })
    }

    /// Replace the timezone offset source
    #[must_use]
    pub fn with_offset_source(mut self, offset: impl OffsetSource + 'static) -> Self {
        self.offset = Box::new(offset);
        self
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Get the weather at a coordinate
    #[instrument(skip(self))]
    pub fn weather_for_coordinates(&self, latitude: f64, longitude: f64) -> Result<WeatherInfo> {
        info!(
            "Getting weather for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );
        let start_time = Instant::now();

        let url = self
            .request()
            .param("lat", latitude)
            .param("long", longitude)
            .param("type", "weather");
        let payload = self.get_json(url)?;
        let weather = mapper::parse_weather(&payload, self.conversion)?;

        info!(
            "Retrieved weather in {:.3}s: {}",
            start_time.elapsed().as_secs_f64(),
            weather.format_temperature()
        );
        Ok(weather)
    }

    /// List every entry of the image catalog, in response order
    #[instrument(skip(self))]
    pub fn list_images(&self) -> Result<Vec<ImageEntry>> {
        let url = self
            .request()
            .param("action", "list")
            .param("type", "images");
        let payload = self.get_json(url)?;
        let catalog = mapper::parse_image_catalog(&payload)?;

        debug!("Image catalog has {} entries", catalog.len());
        Ok(catalog)
    }

    /// List image ids, optionally keeping only those whose category equals
    /// `category` exactly.
    #[instrument(skip(self))]
    pub fn list_image_ids(&self, category: Option<&str>) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .list_images()?
            .into_iter()
            .filter(|image| match category {
                Some(wanted) => image.category.as_deref() == Some(wanted),
                None => true,
            })
            .map(|image| image.id)
            .collect();

        info!(
            "Found {} image ids for category {}",
            ids.len(),
            category.unwrap_or("<any>")
        );
        Ok(ids)
    }

    /// Download an image by id into the download directory.
    ///
    /// The body is streamed into a temporary file inside the download
    /// directory, then renamed to `{id}-{10 hex chars}`. The temporary file
    /// is removed if anything fails before the rename.
    #[instrument(skip(self))]
    pub fn download_image(&mut self, image_id: &str) -> Result<PathBuf> {
        let start_time = Instant::now();
        let url = self
            .with_tz(self.request().param("image", image_id).param("type", "images"))
            .build();

        let mut response = http::get(&self.client, &url, &url)?;

        fs::create_dir_all(&self.download_dir)?;
        let mut temp = tempfile::NamedTempFile::new_in(&self.download_dir)?;
        let bytes = response
            .copy_to(temp.as_file_mut())
            .map_err(|e| {
                AuroraError::transport(format!("Failed to read image body: {}", e.without_url()))
            })?;

        let file_name = format!("{}-{}", file_stem(image_id), self.random_suffix());
        let path = self.download_dir.join(file_name);
        temp.persist(&path)?;

        info!(
            "Downloaded image {} ({} bytes) to {} in {:.3}s",
            image_id,
            bytes,
            path.display(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(path)
    }

    /// Download a uniformly chosen image from the `cam` category
    #[instrument(skip(self))]
    pub fn download_random_image(&mut self) -> Result<PathBuf> {
        let category = ImageCategory::Cam.as_str();
        let ids = self.list_image_ids(Some(category))?;
        if ids.is_empty() {
            warn!("Image catalog has no entries in category {}", category);
            return Err(AuroraError::no_images(category));
        }

        let index = self.rng.random_range(0..ids.len());
        let image_id = &ids[index];
        debug!("Picked image {} of {}: {}", index + 1, ids.len(), image_id);

        self.download_image(image_id)
    }

    /// Query builder for the versioned endpoint; `tz` is appended last by [`Self::with_tz`]
    fn request(&self) -> QueryBuilder {
        QueryBuilder::new(&self.base_url, &self.api_version)
    }

    fn with_tz(&self, query: QueryBuilder) -> QueryBuilder {
        query.param("tz", self.offset.utc_offset_seconds())
    }

    fn get_json(&self, query: QueryBuilder) -> Result<serde_json::Value> {
        let url = self.with_tz(query).build();
        http::get_json(&self.client, &url, &url)
    }

    fn random_suffix(&mut self) -> String {
        (0..SUFFIX_BYTES)
            .map(|_| format!("{:02x}", self.rng.random_range(0..=u8::MAX)))
            .collect()
    }
}

/// Make an image id safe to use as a file name component
fn file_stem(image_id: &str) -> String {
    let stem: String = image_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    match stem.trim_start_matches('.') {
        "" => "image".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn client(seed: u64) -> AuroraClient<StdRng> {
        AuroraClient::with_rng(&AuroraConfig::default(), StdRng::seed_from_u64(seed))
            .unwrap()
            .with_offset_source(StaticOffset(-18_000))
    }

    #[test]
    fn test_file_stem_replaces_unsafe_characters() {
        assert_eq!(file_stem("cressy"), "cressy");
        assert_eq!(file_stem("yk-cam_2.jpg"), "yk-cam_2.jpg");
        assert_eq!(file_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(file_stem("a b?c"), "a_b_c");
        assert_eq!(file_stem(".."), "image");
    }

    #[test]
    fn test_random_suffix_is_ten_hex_chars() {
        let mut client = client(1);
        let suffix = client.random_suffix();
        assert_eq!(suffix.len(), SUFFIX_BYTES * 2);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_suffix_is_reproducible_with_seed() {
        let mut first = client(42);
        let mut second = client(42);
        assert_eq!(first.random_suffix(), second.random_suffix());
    }

    #[test]
    fn test_tz_is_appended_last() {
        let client = client(0);
        let url = client
            .with_tz(client.request().param("action", "list").param("type", "images"))
            .build();
        assert_eq!(
            url,
            "https://api.auroras.live/v1/?action=list&type=images&tz=-18000"
        );
    }
}
