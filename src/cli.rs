//! Command-line interface: argument parsing, logging setup and output

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{AuroraConfig, LoggingConfig};
use crate::models::{ImageCategory, LocationInfo, WeatherInfo};
use crate::service::AuroraService;
use crate::AuroraError;

#[derive(Debug, Parser)]
#[command(name = "aurorawx", version)]
#[command(about = "Aurora webcam images and zip code weather from Auroras.live")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download a random aurora webcam image and print its path
    #[command(name = "download_random_image")]
    DownloadRandomImage,

    /// Show the weather for a US zip code
    #[command(name = "get_weather_for_zip")]
    GetWeatherForZip {
        /// 5-digit zip code
        zipcode: String,
    },

    /// Show the weather at a coordinate
    #[command(name = "get_weather")]
    GetWeather {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// List image ids from the aurora image catalog
    #[command(name = "list_images")]
    ListImages {
        /// Only list images in this category (cam, satellite, chart)
        #[arg(long)]
        category: Option<ImageCategory>,
    },

    /// Download one image by id and print its path
    #[command(name = "download_image")]
    DownloadImage { image_id: String },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = AuroraConfig::load_from_path(self.config.clone())?;
        init_logging(&config.logging, self.verbose)?;
        debug!("Loaded configuration: {:?}", config.logging);

        let mut service = AuroraService::new(&config).map_err(friendly)?;

        match self.command {
            Command::DownloadRandomImage => {
                let path = service.download_random_image().map_err(friendly)?;
                print_pretty_json(&path)?;
            }
            Command::GetWeatherForZip { zipcode } => {
                let forecast = service.forecast_for_zip(&zipcode).map_err(friendly)?;
                let report = WeatherReport {
                    zip: Some((zipcode.as_str(), &forecast.location)),
                    weather: &forecast.weather,
                };
                print!("{report}");
            }
            Command::GetWeather {
                latitude,
                longitude,
            } => {
                let weather = service
                    .weather_for_coordinates(latitude, longitude)
                    .map_err(friendly)?;
                let report = WeatherReport {
                    zip: None,
                    weather: &weather,
                };
                print!("{report}");
            }
            Command::ListImages { category } => {
                let ids = service
                    .list_image_ids(category.map(ImageCategory::as_str))
                    .map_err(friendly)?;
                print_pretty_json(&ids)?;
            }
            Command::DownloadImage { image_id } => {
                let path = service.download_image(&image_id).map_err(friendly)?;
                print_pretty_json(&path)?;
            }
        }

        Ok(())
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,aurorawx={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

/// Human-readable weather report.
///
/// The location header is included when the weather came from a zip lookup.
pub struct WeatherReport<'a> {
    pub zip: Option<(&'a str, &'a LocationInfo)>,
    pub weather: &'a WeatherInfo,
}

impl fmt::Display for WeatherReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weather = self.weather;

        if let Some((zipcode, location)) = self.zip {
            writeln!(f, "The weather for Zip Code: {zipcode}")?;
            writeln!(
                f,
                "Location: {} ({})",
                location.display_name(),
                location.format_coordinates()
            )?;
        }
        writeln!(f, "It is {:.1} degrees out", weather.temperature_f)?;
        writeln!(
            f,
            "Cloud: {}; Rain: {}; Humidity: {}; Fog: {}",
            weather.cloud, weather.rain, weather.humidity, weather.fog
        )?;
        writeln!(f, "Wind: {}", weather.format_wind())?;
        writeln!(f)?;
        writeln!(
            f,
            "The sun rises at {} and sets at {}",
            weather.sun_and_moon.sunrise, weather.sun_and_moon.sunset
        )?;
        writeln!(
            f,
            "The current moon phase is: {}",
            weather.sun_and_moon.moonphase
        )
    }
}

fn print_pretty_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to format output as JSON")?;
    println!("{json}");
    Ok(())
}

/// Attach the user-facing message while keeping the detailed error as the cause
fn friendly(err: AuroraError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SunMoonInfo, WindInfo};

    fn weather() -> WeatherInfo {
        WeatherInfo {
            temperature_f: 70.7,
            cloud: 10.0,
            rain: 0.4,
            humidity: 81.2,
            fog: 0.0,
            symbol: Some(3),
            wind: WindInfo {
                speed: Some(4.1),
                direction: Some("NNE".to_string()),
            },
            sun_and_moon: SunMoonInfo {
                sunrise: "07:12".to_string(),
                sunset: "19:48".to_string(),
                moonphase: 0.61,
            },
        }
    }

    #[test]
    fn test_weather_report_for_zip() {
        let location = LocationInfo::new(
            "43065".to_string(),
            40.177_519,
            -83.094_353,
            "Powell".to_string(),
            "OH".to_string(),
        );
        let weather = weather();
        let report = WeatherReport {
            zip: Some(("43065", &location)),
            weather: &weather,
        }
        .to_string();

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            [
                "The weather for Zip Code: 43065",
                "Location: Powell, OH (40.1775, -83.0944)",
                "It is 70.7 degrees out",
                "Cloud: 10; Rain: 0.4; Humidity: 81.2; Fog: 0",
                "Wind: 4.1 NNE",
                "",
                "The sun rises at 07:12 and sets at 19:48",
                "The current moon phase is: 0.61",
            ]
        );
    }

    #[test]
    fn test_weather_report_without_location() {
        let weather = weather();
        let report = WeatherReport {
            zip: None,
            weather: &weather,
        }
        .to_string();
        assert!(report.starts_with("It is 70.7 degrees out"));
        assert!(!report.contains("Zip Code"));
    }

    #[test]
    fn test_cli_parses_original_command_names() {
        let cli = Cli::try_parse_from(["aurorawx", "get_weather_for_zip", "43065"]).unwrap();
        assert!(matches!(cli.command, Command::GetWeatherForZip { ref zipcode } if zipcode == "43065"));

        let cli = Cli::try_parse_from(["aurorawx", "download_random_image"]).unwrap();
        assert!(matches!(cli.command, Command::DownloadRandomImage));
    }

    #[test]
    fn test_cli_parses_negative_coordinates_and_category() {
        let cli = Cli::try_parse_from(["aurorawx", "get_weather", "40.17", "-83.09"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::GetWeather { latitude, longitude } if latitude == 40.17 && longitude == -83.09
        ));

        let cli =
            Cli::try_parse_from(["aurorawx", "--verbose", "list_images", "--category", "cam"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::ListImages { category: Some(ImageCategory::Cam) }
        ));

        assert!(Cli::try_parse_from(["aurorawx", "list_images", "--category", "webcam"]).is_err());
    }

    #[test]
    fn test_cli_requires_zipcode() {
        assert!(Cli::try_parse_from(["aurorawx", "get_weather_for_zip"]).is_err());
    }
}
