//! Blocking HTTP plumbing shared by the aurora and zip code clients

use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{AuroraError, Result};

const USER_AGENT: &str = concat!("aurorawx/", env!("CARGO_PKG_VERSION"));
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Build a blocking client with the given request timeout
pub fn build_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AuroraError::config(format!("Failed to create HTTP client: {e}")))
}

/// Issue a GET and return the response if the status is a success.
///
/// `log_url` is what gets logged in place of `url`, so callers can redact
/// credentials embedded in the path.
pub fn get(client: &Client, url: &str, log_url: &str) -> Result<Response> {
    let start = Instant::now();
    debug!("GET {}", log_url);

    let response = client.get(url).send().map_err(|e| {
        // the error text would otherwise repeat the unredacted url
        let e = e.without_url();
        warn!(
            "Request to {} failed after {:.3}s: {}",
            log_url,
            start.elapsed().as_secs_f64(),
            e
        );
        AuroraError::transport(format!("Request to {log_url} failed: {e}"))
    })?;

    let elapsed = start.elapsed();
    let status = response.status();
    debug!(
        "HTTP response received: {} in {:.3}s",
        status,
        elapsed.as_secs_f64()
    );

    if elapsed > SLOW_RESPONSE {
        warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
    }

    if !status.is_success() {
        error!("Request to {} returned {}", log_url, status);
        return Err(AuroraError::remote(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error"),
        ));
    }

    info!(
        "Successful API request in {:.3}s",
        elapsed.as_secs_f64()
    );
    Ok(response)
}

/// GET a URL and decode the body as JSON
pub fn get_json(client: &Client, url: &str, log_url: &str) -> Result<Value> {
    let response = get(client, url, log_url)?;
    let body = response
        .text()
        .map_err(|e| {
            AuroraError::transport(format!(
                "Failed to read response body: {}",
                e.without_url()
            ))
        })?;

    serde_json::from_str(&body).map_err(|e| {
        error!("Failed to parse response from {}: {}", log_url, e);
        AuroraError::invalid_response(format!("Response from {log_url} is not valid JSON: {e}"))
    })
}
