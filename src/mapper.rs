//! Response mapping from raw JSON payloads into typed records
//!
//! These functions do no I/O. Numeric fields accept either JSON numbers or
//! numeric strings, since the aurora service reports most measurements as
//! strings (`"cloud": "10"`).

use serde_json::Value;

use crate::models::{
    ImageEntry, LocationInfo, SunMoonInfo, TemperatureConversion, WeatherInfo, WindInfo,
};
use crate::{AuroraError, Result};

/// Map a zip code geocoding response into a [`LocationInfo`]
pub fn parse_location(payload: &Value) -> Result<LocationInfo> {
    Ok(LocationInfo {
        zip_code: required_text(payload, "zip_code")?,
        latitude: required_f64(payload, "lat")?,
        longitude: required_f64(payload, "lng")?,
        city: required_string(payload, "city")?,
        state: required_string(payload, "state")?,
    })
}

/// Map an aurora weather response into a [`WeatherInfo`]
pub fn parse_weather(payload: &Value, conversion: TemperatureConversion) -> Result<WeatherInfo> {
    let celsius = required_f64(payload, "temperature")?;

    Ok(WeatherInfo {
        temperature_f: conversion.to_fahrenheit(celsius),
        cloud: required_f64(payload, "cloud")?,
        rain: required_f64(payload, "rain")?,
        humidity: required_f64(payload, "humidity")?,
        fog: required_f64(payload, "fog")?,
        symbol: optional_i64(payload, "symbol")?,
        wind: parse_wind(payload.get("wind"))?,
        sun_and_moon: SunMoonInfo {
            sunrise: required_string(payload, "sunrise")?,
            sunset: required_string(payload, "sunset")?,
            moonphase: required_f64(payload, "moonphase")?,
        },
    })
}

/// Map an aurora image list response into catalog entries.
///
/// Entries keep the order of the `images` object. An entry without an `id`
/// falls back to its key in that object.
pub fn parse_image_catalog(payload: &Value) -> Result<Vec<ImageEntry>> {
    let images = present(payload, "images")
        .and_then(Value::as_object)
        .ok_or_else(|| AuroraError::missing_field("images"))?;

    images
        .iter()
        .map(|(key, image)| {
            if !image.is_object() {
                return Err(AuroraError::missing_field(format!("images.{key}")));
            }
            let id = match present(image, "id") {
                Some(Value::String(id)) => id.clone(),
                None => key.clone(),
                Some(_) => return Err(AuroraError::missing_field(format!("images.{key}.id"))),
            };
            let category = present(image, "category")
                .and_then(Value::as_str)
                .map(str::to_string);
            Ok(ImageEntry { id, category })
        })
        .collect()
}

fn parse_wind(wind: Option<&Value>) -> Result<WindInfo> {
    let Some(wind) = wind.filter(|w| !w.is_null()) else {
        return Ok(WindInfo::default());
    };
    if !wind.is_object() {
        return Err(AuroraError::missing_field("wind"));
    }

    let speed = match present(wind, "speed") {
        Some(value) => Some(
            coerce_f64(value).ok_or_else(|| AuroraError::missing_field("wind.speed"))?,
        ),
        None => None,
    };
    let direction = match present(wind, "direction") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(AuroraError::missing_field("wind.direction")),
        None => None,
    };

    Ok(WindInfo { speed, direction })
}

/// Field lookup that treats JSON `null` as absent
fn present<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn required_f64(object: &Value, key: &str) -> Result<f64> {
    present(object, key)
        .and_then(coerce_f64)
        .ok_or_else(|| AuroraError::missing_field(key))
}

fn required_string(object: &Value, key: &str) -> Result<String> {
    match present(object, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(AuroraError::missing_field(key)),
    }
}

/// Like [`required_string`] but also accepts numbers, so `43065` and `"43065"` both map
fn required_text(object: &Value, key: &str) -> Result<String> {
    match present(object, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(AuroraError::missing_field(key)),
    }
}

fn optional_i64(object: &Value, key: &str) -> Result<Option<i64>> {
    match present(object, key) {
        None => Ok(None),
        Some(value) => coerce_i64(value)
            .map(Some)
            .ok_or_else(|| AuroraError::missing_field(key)),
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_payload() -> Value {
        json!({
            "temperature": "21.5",
            "cloud": "10",
            "rain": "0.4",
            "humidity": "81.2",
            "fog": "0",
            "symbol": "3",
            "wind": { "speed": 4.1, "direction": "NNE" },
            "sunrise": "07:12",
            "sunset": "19:48",
            "moonphase": "0.61"
        })
    }

    #[test]
    fn test_parse_location_keeps_fields() {
        let payload = json!({
            "zip_code": "43065",
            "lat": 40.177519,
            "lng": -83.094353,
            "city": "Powell",
            "state": "OH"
        });

        let location = parse_location(&payload).unwrap();
        assert_eq!(location.zip_code, "43065");
        assert_eq!(location.latitude, 40.177519);
        assert_eq!(location.longitude, -83.094353);
        assert_eq!(location.city, "Powell");
        assert_eq!(location.state, "OH");
    }

    #[test]
    fn test_parse_location_coerces_string_coordinates() {
        let payload = json!({
            "zip_code": 43065,
            "lat": "40.177519",
            "lng": "-83.094353",
            "city": "Powell",
            "state": "OH"
        });

        let location = parse_location(&payload).unwrap();
        assert_eq!(location.zip_code, "43065");
        assert_eq!(location.latitude, 40.177519);
        assert_eq!(location.longitude, -83.094353);
    }

    #[test]
    fn test_parse_location_missing_city() {
        let payload = json!({ "zip_code": "43065", "lat": 40.1, "lng": -83.0, "state": "OH" });
        let err = parse_location(&payload).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "city"));
    }

    #[test]
    fn test_parse_location_rejects_error_body() {
        // zipcodeapi reports failures as {"error_code": .., "error_msg": ..}
        let payload = json!({ "error_code": 404, "error_msg": "Zip code not found." });
        let err = parse_location(&payload).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "zip_code"));
    }

    #[test]
    fn test_parse_weather_coerces_strings() {
        let weather = parse_weather(&weather_payload(), TemperatureConversion::Corrected).unwrap();
        assert_eq!(weather.cloud, 10.0);
        assert_eq!(weather.rain, 0.4);
        assert_eq!(weather.humidity, 81.2);
        assert_eq!(weather.fog, 0.0);
        assert_eq!(weather.symbol, Some(3));
        assert_eq!(weather.wind.speed, Some(4.1));
        assert_eq!(weather.wind.direction.as_deref(), Some("NNE"));
        assert_eq!(weather.sun_and_moon.sunrise, "07:12");
        assert_eq!(weather.sun_and_moon.sunset, "19:48");
        assert_eq!(weather.sun_and_moon.moonphase, 0.61);
    }

    #[test]
    fn test_parse_weather_temperature_conversions() {
        let payload = weather_payload();

        let corrected = parse_weather(&payload, TemperatureConversion::Corrected).unwrap();
        assert!((corrected.temperature_f - 70.7).abs() < 1e-9);

        let truncated = parse_weather(&payload, TemperatureConversion::Truncated).unwrap();
        assert_eq!(truncated.temperature_f, 53.5);
    }

    #[test]
    fn test_parse_weather_optional_fields_absent() {
        let mut payload = weather_payload();
        let object = payload.as_object_mut().unwrap();
        object.remove("symbol");
        object.remove("wind");

        let weather = parse_weather(&payload, TemperatureConversion::Corrected).unwrap();
        assert_eq!(weather.symbol, None);
        assert_eq!(weather.wind, WindInfo::default());
    }

    #[test]
    fn test_parse_weather_partial_wind() {
        let mut payload = weather_payload();
        payload["wind"] = json!({ "direction": "S", "speed": null });

        let weather = parse_weather(&payload, TemperatureConversion::Corrected).unwrap();
        assert_eq!(weather.wind.speed, None);
        assert_eq!(weather.wind.direction.as_deref(), Some("S"));
    }

    #[test]
    fn test_parse_weather_missing_temperature() {
        let mut payload = weather_payload();
        payload.as_object_mut().unwrap().remove("temperature");

        let err = parse_weather(&payload, TemperatureConversion::Corrected).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "temperature"));
    }

    #[test]
    fn test_parse_image_catalog_preserves_order() {
        let payload = json!({
            "images": {
                "rothney": { "id": "rothney", "category": "cam", "url": "https://example.test/r.jpg" },
                "ace": { "id": "ace", "category": "chart" },
                "cressy": { "category": "cam" },
                "himawari": { "id": "himawari" }
            }
        });

        let catalog = parse_image_catalog(&payload).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["rothney", "ace", "cressy", "himawari"]);
        assert_eq!(catalog[1].category.as_deref(), Some("chart"));
        assert_eq!(catalog[3].category, None);
    }

    #[test]
    fn test_parse_image_catalog_requires_images_object() {
        let err = parse_image_catalog(&json!({ "images": [] })).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "images"));

        let err = parse_image_catalog(&json!({ "images": { "bad": 3 } })).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "images.bad"));
    }

    #[test]
    fn test_parse_weather_malformed_values() {
        let mut payload = weather_payload();
        payload["humidity"] = json!("very");
        let err = parse_weather(&payload, TemperatureConversion::Corrected).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "humidity"));

        let mut payload = weather_payload();
        payload["wind"] = json!({ "speed": "gusty" });
        let err = parse_weather(&payload, TemperatureConversion::Corrected).unwrap_err();
        assert!(matches!(err, AuroraError::MissingField { ref field } if field == "wind.speed"));
    }
}
