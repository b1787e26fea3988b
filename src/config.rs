use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;
use crate::game::{GameState, Player, PlayerId};

/// A player as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    pub id: u8,
    pub colour: String,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Players in turn order; the first one opens the first game.
    pub players: Vec<PlayerConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            players: Player::default_pair()
                .into_iter()
                .map(|player| PlayerConfig {
                    id: player.id().get(),
                    colour: player.colour().to_string(),
                })
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "at least 2 players are required, got {}",
                self.players.len()
            )));
        }

        let mut seen = HashSet::new();
        for (i, player) in self.players.iter().enumerate() {
            if !(PlayerId::MIN..=PlayerId::MAX).contains(&player.id) {
                return Err(ConfigError::Validation(format!(
                    "players[{i}].id must be in [{}, {}]",
                    PlayerId::MIN,
                    PlayerId::MAX
                )));
            }
            if !seen.insert(player.id) {
                return Err(ConfigError::Validation(format!(
                    "players[{i}].id {} is already taken",
                    player.id
                )));
            }
            if player.colour.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "players[{i}].colour must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Build the configured players, in turn order.
    pub fn build_players(&self) -> Result<Vec<Player>, ConfigError> {
        self.players
            .iter()
            .map(|p| Player::new(p.id, p.colour.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Game(e.into()))
    }

    /// Build a fresh game for the configured players.
    pub fn build_game(&self) -> Result<GameState, ConfigError> {
        Ok(GameState::new(self.build_players()?)?)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
