use rand::thread_rng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{assign_roles, GameError, Player, Role, DEFAULT_IMPOSTOR_COUNT};

/// Which screen the shared device should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Menu,
    Setup,
    /// Device is being handed to the current player
    Pass,
    /// Current player is looking at their card
    Reveal,
    /// Everyone has seen their card, discussion is under way
    Playing,
    /// Reserved, nothing enters this status yet
    Voting,
    /// Reserved, nothing enters this status yet
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Menu => "menu",
            GameStatus::Setup => "setup",
            GameStatus::Pass => "pass",
            GameStatus::Reveal => "reveal",
            GameStatus::Playing => "playing",
            GameStatus::Voting => "voting",
            GameStatus::Finished => "finished",
        }
    }

    /// Whether a direct status change from `self` to `next` is allowed
    ///
    /// Only the edges a player can trigger by hand are listed here:
    /// leaving the menu for setup, confirming identity on the pass screen,
    /// and bailing out to the menu from anywhere. Entering `Pass` and
    /// `Playing` is reserved for [`GameSession::start_game`] and
    /// [`GameSession::next_player`].
    pub fn can_transition_to(self, next: GameStatus) -> bool {
        if self == next {
            return true;
        }

        matches!(
            (self, next),
            (_, GameStatus::Menu)
                | (GameStatus::Menu, GameStatus::Setup)
                | (GameStatus::Pass, GameStatus::Reveal)
        )
    }

    /// Whether the roster is dealt and fixed in this status
    pub fn is_in_game(self) -> bool {
        matches!(
            self,
            GameStatus::Pass | GameStatus::Reveal | GameStatus::Playing
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one game on one device
///
/// Owned by whoever hosts it and mutated only through the methods below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    status: GameStatus,
    /// Reveal order
    players: Vec<Player>,
    current_player_index: usize,
    /// Kept across resets as the default for the next setup
    impostor_count: usize,
    common_word: String,
}

impl GameSession {
    /// Create a session sitting on the menu with nobody seated
    pub fn new() -> Self {
        Self {
            status: GameStatus::Menu,
            players: Vec::new(),
            current_player_index: 0,
            impostor_count: DEFAULT_IMPOSTOR_COUNT,
            common_word: String::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn impostor_count(&self) -> usize {
        self.impostor_count
    }

    pub fn common_word(&self) -> &str {
        &self.common_word
    }

    /// Move to another status by hand
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidTransition`] for any edge not allowed by
    /// [`GameStatus::can_transition_to`]; the session is left unchanged.
    pub fn set_status(&mut self, status: GameStatus) -> Result<(), GameError> {
        if !self.status.can_transition_to(status) {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: status,
            });
        }

        tracing::debug!("Status {} -> {}", self.status, status);
        self.status = status;
        Ok(())
    }

    /// Replace the roster outright
    ///
    /// Roles and words are taken as given.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RosterLocked`] once a game has been dealt.
    pub fn set_players(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        if !matches!(self.status, GameStatus::Menu | GameStatus::Setup) {
            return Err(GameError::RosterLocked);
        }

        self.players = players;
        Ok(())
    }

    /// Deal roles and hand the device to the first player
    ///
    /// # Arguments
    ///
    /// * `player_names` - Names in reveal order
    /// * `impostor_count` - Number of impostors, `1..player_names.len()`
    /// * `word` - The common word civilians will see
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not in setup, fewer than three
    /// names are given, or the impostor count would leave no civilian.
    pub fn start_game(
        &mut self,
        player_names: Vec<String>,
        impostor_count: usize,
        word: String,
    ) -> Result<(), GameError> {
        let mut rng = thread_rng();
        self.start_game_with_rng(player_names, impostor_count, word, &mut rng)
    }

    /// [`start_game`](Self::start_game) with an explicit randomness source
    pub fn start_game_with_rng<R: Rng + ?Sized>(
        &mut self,
        player_names: Vec<String>,
        impostor_count: usize,
        word: String,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if self.status != GameStatus::Setup {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: GameStatus::Pass,
            });
        }

        let roles = assign_roles(player_names.len(), impostor_count, rng)?;

        self.players = player_names
            .into_iter()
            .zip(roles)
            .enumerate()
            .map(|(index, (name, role))| Player::new(index, name, role, &word))
            .collect();
        self.status = GameStatus::Pass;
        self.current_player_index = 0;
        self.common_word = word;
        self.impostor_count = impostor_count;

        tracing::info!(
            "Game started with {} players and {} impostors",
            self.players.len(),
            impostor_count
        );

        Ok(())
    }

    /// Finish the current player's turn
    ///
    /// Hands the device to the next player, or starts the discussion once
    /// the last player has seen their card.
    ///
    /// # Returns
    ///
    /// The status the session moved to
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidTransition`] outside the pass/reveal cycle.
    pub fn next_player(&mut self) -> Result<GameStatus, GameError> {
        if !matches!(self.status, GameStatus::Pass | GameStatus::Reveal) {
            return Err(GameError::InvalidTransition {
                from: self.status,
                to: GameStatus::Pass,
            });
        }

        let next_index = self.current_player_index + 1;
        if next_index >= self.players.len() {
            self.status = GameStatus::Playing;
            self.current_player_index = 0;
            tracing::info!("All {} players have seen their card", self.players.len());
        } else {
            self.status = GameStatus::Pass;
            self.current_player_index = next_index;
        }

        Ok(self.status)
    }

    /// Go back to the menu and forget the current game
    ///
    /// The impostor count survives as the default for the next setup.
    pub fn reset_game(&mut self) {
        self.status = GameStatus::Menu;
        self.players.clear();
        self.current_player_index = 0;
        self.common_word.clear();
    }

    /// The player the device belongs to right now, during pass and reveal
    pub fn current_player(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Pass | GameStatus::Reveal => self.players.get(self.current_player_index),
            _ => None,
        }
    }

    /// The card of the player currently revealing
    pub fn reveal_card(&self) -> Option<&Player> {
        if self.status != GameStatus::Reveal {
            return None;
        }
        self.players.get(self.current_player_index)
    }

    /// The common word, once the discussion has started
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WordHidden`] until every player has seen their card.
    pub fn disclosed_word(&self) -> Result<&str, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::WordHidden);
        }
        Ok(&self.common_word)
    }

    /// Count of (civilians, impostors) currently seated
    pub fn role_counts(&self) -> (usize, usize) {
        let impostors = self
            .players
            .iter()
            .filter(|p| p.role == Role::Impostor)
            .count();
        (self.players.len() - impostors, impostors)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
