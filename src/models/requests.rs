use serde::{Deserialize, Serialize};

use crate::core::{validate_player_name, Category, GameStatus, MAX_PLAYERS, MIN_PLAYERS};

/// Request to move the session to another status by hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: GameStatus,
}

/// Replace the whole setup draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSetupRequest {
    pub player_names: Vec<String>,
    pub impostor_count: usize,
    #[serde(default)]
    pub category: Category,
}

impl UpdateSetupRequest {
    /// Check roster size and clean every name
    ///
    /// # Returns
    ///
    /// The request with trimmed names, or a message describing the first problem
    pub fn validate(self) -> Result<Self, String> {
        if self.player_names.len() < MIN_PLAYERS {
            return Err(format!("Need at least {} players", MIN_PLAYERS));
        }
        if self.player_names.len() > MAX_PLAYERS {
            return Err(format!("At most {} players allowed", MAX_PLAYERS));
        }

        let player_names = self
            .player_names
            .iter()
            .map(|name| validate_player_name(name).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        if self.impostor_count == 0 || self.impostor_count >= player_names.len() {
            return Err(format!(
                "Impostor count must be between 1 and {}",
                player_names.len() - 1
            ));
        }

        Ok(Self {
            player_names,
            ..self
        })
    }
}

/// Rename one seat in the setup draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlayerRequest {
    pub name: String,
}
