//! Weather API client for OpenWeatherMap integration
//!
//! Retrieves current conditions by city name from the `/weather` endpoint
//! with metric units. A single request is made per call, without retries.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::WeatherSource;
use crate::config::WeatherConfig;
use crate::models::Observation;
use crate::{Result, VERSION, WetBulbError};

/// Current weather response from the OpenWeatherMap API
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainMeasurements,
    /// Time of data calculation, unix seconds
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MainMeasurements {
    temp: f64,
    humidity: f64,
}

/// Error body returned alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Weather API client for OpenWeatherMap
pub struct OpenWeatherMapClient {
    /// HTTP client
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherMapClient {
    /// Create a new client from the weather configuration.
    ///
    /// Fails with a configuration error when no API key is configured.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                WetBulbError::config(
                    "OpenWeatherMap API key is required (set weather.api_key or WETBULB_WEATHER__API_KEY)",
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(format!("wetbulb/{VERSION}"))
            .build()
            .map_err(|e| WetBulbError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build the current-weather URL for a city
    fn current_weather_url(&self, city: &str) -> String {
        format!(
            "{}/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        )
    }
}

impl WeatherSource for OpenWeatherMapClient {
    #[instrument(skip(self))]
    fn fetch(&self, city: &str) -> Result<Observation> {
        info!("Getting current weather for '{}'", city);
        let start_time = Instant::now();

        let url = self.current_weather_url(city);
        debug!("OpenWeatherMap request URL: {}", redact_api_key(&url));

        // reqwest errors carry the request URL, which holds the key
        let response = self.client.get(&url).send().map_err(|e| {
            let e = e.without_url();
            warn!("Network error for '{}': {}", city, e);
            WetBulbError::fetch_failed(city, format!("network error: {e}"))
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            let e = e.without_url();
            warn!("Failed to read response body for '{}': {}", city, e);
            WetBulbError::fetch_failed(city, format!("failed to read response: {e}"))
        })?;
        debug!("HTTP response received: {}", status);

        let observation = parse_current_weather(city, status, &body)?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved weather for '{}' in {:.3}s: {} / {}",
            city,
            total_duration.as_secs_f64(),
            observation.format_temperature(),
            observation.format_humidity()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(observation)
    }
}

/// Turn a raw provider response into a typed observation.
///
/// Any status other than 200 reports the provider's `message` when one is present.
/// Missing or mistyped fields and out-of-range values are fetch failures.
pub fn parse_current_weather(city: &str, status: StatusCode, body: &str) -> Result<Observation> {
    if status != StatusCode::OK {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                )
            });
        warn!("Provider rejected '{}' ({}): {}", city, status, message);
        return Err(WetBulbError::fetch_failed(city, message));
    }

    let response: CurrentWeatherResponse = serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse weather response for '{}': {}", city, e);
        WetBulbError::fetch_failed(city, format!("malformed weather payload: {e}"))
    })?;

    let observed_at = response
        .dt
        .and_then(|dt| DateTime::from_timestamp(dt, 0))
        .unwrap_or_else(Utc::now);

    Observation::new(response.main.temp, response.main.humidity, observed_at).map_err(|e| {
        warn!("Rejected weather values for '{}': {}", city, e);
        WetBulbError::fetch_failed(city, format!("invalid weather values: {e}"))
    })
}

fn redact_api_key(url: &str) -> &str {
    url.split("appid=")
        .next()
        .unwrap_or(url)
        .trim_end_matches('&')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_config() -> WeatherConfig {
        WeatherConfig {
            api_key: Some("test_api_key_123".to_string()),
            ..WeatherConfig::default()
        }
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{"main":{"temp":30.2,"feels_like":36.1,"humidity":74},"dt":1700000000,"name":"Mumbai","cod":200}"#;
        let obs = parse_current_weather("Mumbai", StatusCode::OK, body).unwrap();
        assert_eq!(obs.temperature_c, 30.2);
        assert_eq!(obs.relative_humidity_pct, 74.0);
        assert_eq!(obs.observed_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_parse_without_timestamp_uses_now() {
        let before = Utc::now();
        let body = r#"{"main":{"temp":28.0,"humidity":60}}"#;
        let obs = parse_current_weather("Goa", StatusCode::OK, body).unwrap();
        assert!(obs.observed_at >= before);
    }

    #[test]
    fn test_parse_provider_error_message() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        let err = parse_current_weather("Atlantis", StatusCode::NOT_FOUND, body).unwrap_err();
        match err {
            WetBulbError::FetchFailed { city, message } => {
                assert_eq!(city, "Atlantis");
                assert_eq!(message, "city not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_without_json_body() {
        let err = parse_current_weather("Kochi", StatusCode::INTERNAL_SERVER_ERROR, "oops")
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 500 Internal Server Error"));
    }

    #[test]
    fn test_parse_rejects_other_success_statuses() {
        let body = r#"{"main":{"temp":30.0,"humidity":70}}"#;
        let err = parse_current_weather("Goa", StatusCode::ACCEPTED, body).unwrap_err();
        assert!(err.to_string().contains("HTTP 202 Accepted"));
    }

    #[test]
    fn test_network_error_does_not_leak_api_key() {
        let config = WeatherConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 5,
            ..test_config()
        };
        let client = OpenWeatherMapClient::new(&config).unwrap();

        let err = client.fetch("Goa").unwrap_err();
        match &err {
            WetBulbError::FetchFailed { city, message } => {
                assert_eq!(city, "Goa");
                assert!(message.starts_with("network error"), "got: {message}");
                assert!(!message.contains("test_api_key_123"), "got: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.user_message().contains("test_api_key_123"));
    }

    #[rstest]
    #[case::missing_main(r#"{"dt":1}"#)]
    #[case::missing_humidity(r#"{"main":{"temp":30.0}}"#)]
    #[case::mistyped_temp(r#"{"main":{"temp":"hot","humidity":50}}"#)]
    #[case::humidity_out_of_range(r#"{"main":{"temp":30.0,"humidity":140}}"#)]
    #[case::not_json("<html></html>")]
    fn test_parse_malformed_payload(#[case] body: &str) {
        let result = parse_current_weather("Chennai", StatusCode::OK, body);
        assert!(matches!(result, Err(WetBulbError::FetchFailed { .. })));
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = OpenWeatherMapClient::new(&WeatherConfig::default());
        assert!(matches!(result, Err(WetBulbError::Config { .. })));
    }

    #[test]
    fn test_current_weather_url_encodes_city() {
        let client = OpenWeatherMapClient::new(&test_config()).unwrap();
        let url = client.current_weather_url("New Delhi");
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?q=New%20Delhi&units=metric&appid=test_api_key_123"
        );
    }

    #[test]
    fn test_redact_api_key() {
        let url = "https://example.com/weather?q=Goa&units=metric&appid=secret";
        assert_eq!(
            redact_api_key(url),
            "https://example.com/weather?q=Goa&units=metric"
        );
    }
}
