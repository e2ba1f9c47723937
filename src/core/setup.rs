use serde::Serialize;

use super::{Category, GameError, MAX_NAME_LENGTH, MAX_PLAYERS, MIN_PLAYERS};

/// Settings being edited on the setup screen
///
/// Always holds between [`MIN_PLAYERS`] and [`MAX_PLAYERS`] valid names and
/// an impostor count that leaves at least one civilian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupDraft {
    player_names: Vec<String>,
    impostor_count: usize,
    category: Category,
}

/// Validate and clean a player name
///
/// # Validation Rules
///
/// - Must not be empty after trimming
/// - Length: 1-20 characters
/// - Only alphanumeric characters and spaces allowed
pub fn validate_player_name(name: &str) -> Result<String, GameError> {
    let cleaned = name.trim();

    if cleaned.is_empty() {
        return Err(GameError::InvalidName("Name cannot be empty".to_string()));
    }

    if cleaned.chars().count() > MAX_NAME_LENGTH {
        return Err(GameError::InvalidName(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        )));
    }

    if !cleaned
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ')
    {
        return Err(GameError::InvalidName(
            "Name must contain only letters, numbers, and spaces".to_string(),
        ));
    }

    Ok(cleaned.to_string())
}

impl SetupDraft {
    /// Three default players, the given impostor count (clamped), General words
    pub fn new(impostor_count: usize) -> Self {
        let mut draft = Self {
            player_names: (1..=MIN_PLAYERS).map(|i| format!("Player {}", i)).collect(),
            impostor_count: 1,
            category: Category::default(),
        };
        draft.set_impostor_count(impostor_count);
        draft
    }

    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    pub fn impostor_count(&self) -> usize {
        self.impostor_count
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Largest impostor count the current roster allows
    pub fn max_impostors(&self) -> usize {
        self.player_names.len() - 1
    }

    /// Append a player named after their seat number
    pub fn add_player(&mut self) -> Result<(), GameError> {
        if self.player_names.len() >= MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }

        let name = format!("Player {}", self.player_names.len() + 1);
        self.player_names.push(name);
        Ok(())
    }

    /// Remove a player, never going below [`MIN_PLAYERS`]
    ///
    /// The impostor count shrinks with the roster if needed.
    pub fn remove_player(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.player_names.len() {
            return Err(GameError::UnknownPlayer(index));
        }

        if self.player_names.len() <= MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers(self.player_names.len() - 1));
        }

        self.player_names.remove(index);
        self.set_impostor_count(self.impostor_count);
        Ok(())
    }

    pub fn rename_player(&mut self, index: usize, name: &str) -> Result<(), GameError> {
        let cleaned = validate_player_name(name)?;
        let slot = self
            .player_names
            .get_mut(index)
            .ok_or(GameError::UnknownPlayer(index))?;
        *slot = cleaned;
        Ok(())
    }

    /// Set the impostor count, clamped to `1..=max_impostors()`
    ///
    /// # Returns
    ///
    /// The count actually stored
    pub fn set_impostor_count(&mut self, impostor_count: usize) -> usize {
        self.impostor_count = impostor_count.clamp(1, self.max_impostors());
        self.impostor_count
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Replace the whole draft at once
    ///
    /// Unlike the single-field editors this does not clamp: every name must
    /// be valid and the impostor count must already be in range.
    pub fn replace(
        &mut self,
        player_names: &[String],
        impostor_count: usize,
        category: Category,
    ) -> Result<(), GameError> {
        if player_names.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers(player_names.len()));
        }
        if player_names.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        if impostor_count == 0 || impostor_count >= player_names.len() {
            return Err(GameError::InvalidImpostorCount {
                requested: impostor_count,
                max: player_names.len() - 1,
            });
        }

        let cleaned = player_names
            .iter()
            .map(|name| validate_player_name(name))
            .collect::<Result<Vec<_>, _>>()?;

        self.player_names = cleaned;
        self.impostor_count = impostor_count;
        self.category = category;
        Ok(())
    }
}

impl Default for SetupDraft {
    fn default() -> Self {
        Self::new(1)
    }
}
