//! Zip code geocoding client for zipcodeapi.com
//!
//! Resolves a US zip code into coordinates, city and state. The upstream
//! service is rate limited per API key; no local throttling is applied.

use reqwest::blocking::Client;
use tracing::{info, instrument};

use crate::config::ZipCodeApiConfig;
use crate::http;
use crate::mapper;
use crate::models::LocationInfo;
use crate::{AuroraError, Result};

/// Stands in for the API key in logged URLs
const REDACTED_KEY: &str = "REDACTED";

/// Client for the zip code to location endpoint
pub struct ZipCodeClient {
    client: Client,
    base_url: String,
    api_version: String,
    api_key: Option<String>,
}

impl ZipCodeClient {
    /// Create a new zip code client
    pub fn new(config: &ZipCodeApiConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Look up location information for a zip code.
    ///
    /// The zip code is not validated locally; whatever the service answers
    /// for a malformed code is surfaced as an error.
    #[instrument(skip(self))]
    pub fn lookup_location(&self, zip_code: &str) -> Result<LocationInfo> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AuroraError::config(
                "Zip code API key is not configured. Set zipcode.api_key or AURORAWX_ZIPCODE__API_KEY.",
            )
        })?;

        let url = self.request_url(api_key, zip_code);
        let log_url = self.request_url(REDACTED_KEY, zip_code);

        let payload = http::get_json(&self.client, &url, &log_url)?;
        let location = mapper::parse_location(&payload)?;

        info!(
            "Resolved zip code {} to {} ({})",
            zip_code,
            location.display_name(),
            location.format_coordinates()
        );
        Ok(location)
    }

    fn request_url(&self, api_key: &str, zip_code: &str) -> String {
        format!(
            "{}/{}/{}/info.json/{}/degrees",
            self.base_url,
            self.api_version,
            urlencoding::encode(api_key),
            urlencoding::encode(zip_code)
        )
    }
}
