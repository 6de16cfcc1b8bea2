//! Shared domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A country and its flag, as served by the data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// English country name, also the expected answer.
    pub name: String,
    /// URL of the flag image.
    #[serde(rename = "flag")]
    pub flag_url: String,
    /// ISO 3166-1 alpha-2 code, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso2: Option<String>,
    /// ISO 3166-1 alpha-3 code, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
}

impl Country {
    /// Build a country from a name and flag URL.
    pub fn new(name: impl Into<String>, flag_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag_url: flag_url.into(),
            iso2: None,
            iso3: None,
        }
    }

    /// Whether both the name and the flag URL carry text.
    pub fn is_playable(&self) -> bool {
        !self.name.trim().is_empty() && !self.flag_url.trim().is_empty()
    }

    /// Returns a label combining the name and the alpha-3 code.
    pub fn display_name(&self) -> String {
        match self.iso3.as_deref() {
            Some(code) if !code.is_empty() => format!("{} ({})", self.name, code),
            _ => self.name.clone(),
        }
    }
}

/// A saved player score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name exactly as typed.
    #[serde(rename = "name")]
    pub player_name: String,
    /// Score at the time of saving.
    pub score: u32,
    /// When the entry was recorded. Older lists carry no timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl LeaderboardEntry {
    /// Create an entry stamped with the current time.
    pub fn new(player_name: impl Into<String>, score: u32) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            saved_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_accepts_legacy_shape() {
        let entry: LeaderboardEntry =
            serde_json::from_str(r#"{"name":"Alice","score":42}"#).expect("legacy entry");
        assert_eq!(entry.player_name, "Alice");
        assert_eq!(entry.score, 42);
        assert!(entry.saved_at.is_none());

        let encoded = serde_json::to_value(&entry).expect("encode");
        assert_eq!(encoded, serde_json::json!({"name": "Alice", "score": 42}));
    }

    #[test]
    fn display_name_includes_code() {
        let mut country = Country::new("France", "f.png");
        assert_eq!(country.display_name(), "France");
        country.iso3 = Some("FRA".to_string());
        assert_eq!(country.display_name(), "France (FRA)");
    }
}
