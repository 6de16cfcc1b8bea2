use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::{config::AppConfig, models::Country};

/// Failures while fetching the country pool.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure, including timeouts.
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
    /// The envelope flagged an error.
    #[error("provider reported an error: {0}")]
    Envelope(String),
    /// The body was not the expected JSON.
    #[error("failed to decode provider payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<Value>,
}

/// Client for the flag images endpoint.
#[derive(Debug, Clone)]
pub struct CountryProvider {
    client: reqwest::Client,
    url: String,
}

impl CountryProvider {
    /// Build a client for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Build a client from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.provider_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Endpoint queried by [`CountryProvider::fetch`].
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and validate the country pool with a single GET.
    pub async fn fetch(&self) -> Result<Vec<Country>, ProviderError> {
        info!(url = %self.url, "Fetching countries");
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        parse_countries(&body)
    }
}

/// Decode a provider response, keeping only records with a non-blank name
/// and flag URL.
pub fn parse_countries(body: &str) -> Result<Vec<Country>, ProviderError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.error {
        return Err(ProviderError::Envelope(envelope.msg));
    }

    let total = envelope.data.len();
    let countries: Vec<Country> = envelope
        .data
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Country>(record).ok())
        .filter(Country::is_playable)
        .collect();

    if countries.len() < total {
        warn!(
            dropped = total - countries.len(),
            kept = countries.len(),
            "Skipped malformed country records"
        );
    }
    Ok(countries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_records() -> Result<(), ProviderError> {
        let body = r#"{
            "error": false,
            "msg": "flags images retrieved",
            "data": [
                {"name": "France", "flag": "https://x/fra.svg", "iso2": "FR", "iso3": "FRA"},
                {"name": "Japan", "flag": "https://x/jpn.svg"}
            ]
        }"#;
        let countries = parse_countries(body)?;
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name, "France");
        assert_eq!(countries[0].flag_url, "https://x/fra.svg");
        assert_eq!(countries[0].iso2.as_deref(), Some("FR"));
        assert_eq!(countries[1].iso3, None);
        Ok(())
    }

    #[test]
    fn filters_malformed_records() -> Result<(), ProviderError> {
        let body = r#"{
            "error": false,
            "msg": "",
            "data": [
                {"name": "France", "flag": "f.png"},
                {"name": "", "flag": "blank.png"},
                {"name": "Nowhere"},
                {"name": 12, "flag": "n.png"},
                {"name": "Chad", "flag": "   "},
                "garbage"
            ]
        }"#;
        let countries = parse_countries(body)?;
        let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France"]);
        Ok(())
    }

    #[test]
    fn envelope_error_is_reported() {
        let body = r#"{"error": true, "msg": "rate limited", "data": []}"#;
        match parse_countries(body) {
            Err(ProviderError::Envelope(msg)) => assert_eq!(msg, "rate limited"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn undecodable_body_is_reported() {
        assert!(matches!(
            parse_countries("<html>"),
            Err(ProviderError::Decode(_))
        ));
    }
}
