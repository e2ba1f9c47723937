use serde::{Deserialize, Serialize};

use super::IMPOSTOR_WORD;

/// Secret role dealt to each player at game start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Civilian,
    Impostor,
}

impl Role {
    /// Get the string representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Civilian => "civilian",
            Role::Impostor => "impostor",
        }
    }
}

/// A seat at the table
///
/// Players are only built by [`GameSession::start_game`](super::GameSession::start_game)
/// (or handed in whole through `set_players`), so role and word always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// `player-{index}`, index being the reveal position
    pub id: String,
    /// Display name entered during setup
    pub name: String,
    pub role: Role,
    /// The common word for civilians, [`IMPOSTOR_WORD`] for impostors
    pub word: String,
}

impl Player {
    /// Create a player for the given seat
    ///
    /// # Arguments
    ///
    /// * `index` - Position in the reveal order
    /// * `name` - The player's display name
    /// * `role` - Dealt role
    /// * `common_word` - The word civilians share
    pub fn new(index: usize, name: String, role: Role, common_word: &str) -> Self {
        let word = match role {
            Role::Civilian => common_word.to_string(),
            Role::Impostor => IMPOSTOR_WORD.to_string(),
        };

        Self {
            id: format!("player-{}", index),
            name,
            role,
            word,
        }
    }

    pub fn is_impostor(&self) -> bool {
        self.role == Role::Impostor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_civilian() {
        let player = Player::new(0, "Alice".to_string(), Role::Civilian, "Pizza");

        assert_eq!(player.id, "player-0");
        assert_eq!(player.name, "Alice");
        assert_eq!(player.word, "Pizza");
        assert!(!player.is_impostor());
    }

    #[test]
    fn test_new_impostor_never_sees_word() {
        let player = Player::new(4, "Bob".to_string(), Role::Impostor, "Pizza");

        assert_eq!(player.id, "player-4");
        assert_eq!(player.word, IMPOSTOR_WORD);
        assert!(player.is_impostor());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Impostor).unwrap(),
            "\"impostor\""
        );
        assert_eq!(Role::Civilian.as_str(), "civilian");
    }
}
