//! Aurora image catalog model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AuroraError;

/// One entry of the aurora image catalog
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Identifier accepted by the image download endpoint
    pub id: String,
    /// Catalog category tag, usually one of `cam`, `satellite` or `chart`
    pub category: Option<String>,
}

/// Known catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    Cam,
    Satellite,
    Chart,
}

impl ImageCategory {
    /// Wire name used by the catalog's `category` field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageCategory::Cam => "cam",
            ImageCategory::Satellite => "satellite",
            ImageCategory::Chart => "chart",
        }
    }
}

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageCategory {
    type Err = AuroraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cam" => Ok(ImageCategory::Cam),
            "satellite" => Ok(ImageCategory::Satellite),
            "chart" => Ok(ImageCategory::Chart),
            other => Err(AuroraError::config(format!(
                "Unknown image category '{other}'. Must be one of: cam, satellite, chart"
            ))),
        }
    }
}
