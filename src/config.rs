//! Game configuration, read from JSON handed over by the host page.

use serde::Deserialize;

use crate::catalog::TrackSelection;
use crate::error::{Error, Result};
use crate::guess::MAX_ATTEMPTS;
use crate::reveal::{DEFAULT_THRESHOLDS, RevealPolicy};
use crate::suggest::DEFAULT_SUGGESTION_LIMIT;

/// Where the track list comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogSource {
    #[default]
    Bundled,
    /// Playlist proxy, e.g. `http://localhost:3001`.
    Remote {
        base_url: String,
        playlist_id: String,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_attempts: usize,
    pub reveal_thresholds: Vec<f64>,
    pub suggestion_limit: usize,
    pub volume: f64,
    pub catalog: CatalogSource,
    pub selection: TrackSelection,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            reveal_thresholds: DEFAULT_THRESHOLDS.to_vec(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            volume: 0.7,
            catalog: CatalogSource::Bundled,
            selection: TrackSelection::First,
        }
    }
}

impl GameConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".into()));
        }
        if self.reveal_thresholds.len() != self.max_attempts {
            return Err(Error::Config(format!(
                "expected {} reveal thresholds, got {}",
                self.max_attempts,
                self.reveal_thresholds.len()
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(Error::Config(format!("volume {} outside 0..=1", self.volume)));
        }
        if let CatalogSource::Remote { base_url, playlist_id } = &self.catalog {
            if base_url.trim().is_empty() || playlist_id.trim().is_empty() {
                return Err(Error::Config(
                    "remote catalog needs base_url and playlist_id".into(),
                ));
            }
        }
        self.reveal_policy().map(|_| ())
    }

    pub fn reveal_policy(&self) -> Result<RevealPolicy> {
        RevealPolicy::new(self.reveal_thresholds.clone())
    }
}
