//! Location model for zip code geocoding results

use serde::{Deserialize, Serialize};

/// Location information for a single zip code
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationInfo {
    /// 5-digit zip code as returned by the geocoding service
    pub zip_code: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    pub city: String,
    /// Two-letter state code
    pub state: String,
}

impl LocationInfo {
    #[must_use]
    pub fn new(
        zip_code: String,
        latitude: f64,
        longitude: f64,
        city: String,
        state: String,
    ) -> Self {
        Self {
            zip_code,
            latitude,
            longitude,
            city,
            state,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Format as "City, ST"
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_formatting() {
        let location = LocationInfo::new(
            "43065".to_string(),
            40.177_519,
            -83.094_353,
            "Powell".to_string(),
            "OH".to_string(),
        );
        assert_eq!(location.format_coordinates(), "40.1775, -83.0944");
        assert_eq!(location.display_name(), "Powell, OH");
    }
}
