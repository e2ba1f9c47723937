use serde::{Deserialize, Serialize};

use crate::core::{Category, GameStatus, HostedSession, Player, Role, SetupDraft};

/// A seat as anyone looking at the device may see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: String,
    pub name: String,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

/// Public session state, never containing roles or the word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStateResponse {
    pub session_id: String,
    pub status: GameStatus,
    pub players: Vec<PlayerSummary>,
    pub player_count: usize,
    pub current_player_index: usize,
    /// Who should hold the device, during pass and reveal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<PlayerSummary>,
    pub impostor_count: usize,
}

impl SessionStateResponse {
    pub fn from_session(session: &HostedSession) -> Self {
        let game = &session.game;

        Self {
            session_id: session.id.clone(),
            status: game.status(),
            players: game.players().iter().map(PlayerSummary::from).collect(),
            player_count: game.players().len(),
            current_player_index: game.current_player_index(),
            current_player: game.current_player().map(PlayerSummary::from),
            impostor_count: game.impostor_count(),
        }
    }
}

/// The private card of the player holding the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardResponse {
    pub player_id: String,
    pub name: String,
    pub role: Role,
    pub word: String,
}

impl From<&Player> for CardResponse {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            name: player.name.clone(),
            role: player.role,
            word: player.word.clone(),
        }
    }
}

/// End-of-round disclosure of the common word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordResponse {
    pub word: String,
}

/// The setup draft with its current limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupResponse {
    pub player_names: Vec<String>,
    pub impostor_count: usize,
    pub max_impostors: usize,
    pub category: Category,
}

impl From<&SetupDraft> for SetupResponse {
    fn from(draft: &SetupDraft) -> Self {
        Self {
            player_names: draft.player_names().to_vec(),
            impostor_count: draft.impostor_count(),
            max_impostors: draft.max_impostors(),
            category: draft.category(),
        }
    }
}

/// Newly created session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub status: GameStatus,
}
