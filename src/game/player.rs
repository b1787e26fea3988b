use std::fmt;

use super::board::COMBINATION_LENGTH;
use crate::error::PlayerError;

/// Identifier of a player's pieces. Always in `1..=9`, so it can never be
/// confused with an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(id: u8) -> Result<Self, PlayerError> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(PlayerId(id))
        } else {
            Err(PlayerError::InvalidId(id))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    id: PlayerId,
    colour: String,
}

impl Player {
    /// Create a player, rejecting ids outside `1..=9`
    pub fn new(id: u8, colour: impl Into<String>) -> Result<Self, PlayerError> {
        Ok(Player {
            id: PlayerId::new(id)?,
            colour: colour.into(),
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display colour, e.g. "red"
    pub fn colour(&self) -> &str {
        &self.colour
    }

    /// The run of pieces this player needs to win: its id repeated
    /// `COMBINATION_LENGTH` times.
    pub fn winning_combination(&self) -> [PlayerId; COMBINATION_LENGTH] {
        [self.id; COMBINATION_LENGTH]
    }

    /// The two players of a standard game: 1 (red) and 2 (yellow).
    pub fn default_pair() -> Vec<Player> {
        vec![
            Player {
                id: PlayerId(1),
                colour: "red".to_string(),
            },
            Player {
                id: PlayerId(2),
                colour: "yellow".to_string(),
            },
        ]
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ({})", self.id, self.colour)
    }
}
