use std::path::PathBuf;

/// Errors raised when constructing a player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("player id {0} is out of range (expected 1..=9)")]
    InvalidId(u8),
}

/// Errors raised when a move cannot be applied. The game state is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already won")]
    GameOver,
}

/// Errors raised when constructing a game from a set of players.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("a game needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error("player id {0} is used more than once")]
    DuplicateId(u8),

    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid player set: {0}")]
    Game(#[from] GameError),
}
