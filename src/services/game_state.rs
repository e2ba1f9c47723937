use crate::core::{
    validate_distribution, GameError, GameStatus, HostedSession, SetupDraft, WordProvider,
};

/// Check if the setup draft may be edited
///
/// # Returns
///
/// Tuple of (can_edit, error_message)
pub fn can_edit_setup(session: &HostedSession) -> (bool, String) {
    if session.game.status() != GameStatus::Setup {
        return (
            false,
            "Players can only be edited on the setup screen".to_string(),
        );
    }

    (true, String::new())
}

/// Check if a game can be dealt from the current draft
///
/// # Returns
///
/// Tuple of (can_start, error_message)
pub fn can_start_game(session: &HostedSession) -> (bool, String) {
    if session.game.status() != GameStatus::Setup {
        return (false, "Game can only be started from setup".to_string());
    }

    let draft = &session.setup;
    if let Err(e) = validate_distribution(draft.player_names().len(), draft.impostor_count()) {
        return (false, e.to_string());
    }

    (true, String::new())
}

/// Check if the common word may be shown to the table
///
/// # Returns
///
/// Tuple of (can_disclose, error_message)
pub fn can_disclose_word(session: &HostedSession) -> (bool, String) {
    match session.game.disclosed_word() {
        Ok(_) => (true, String::new()),
        Err(e) => (false, e.to_string()),
    }
}

/// Leave the menu (or stay) for the setup screen
///
/// Coming from the menu starts a fresh draft seeded with the session's
/// remembered impostor count.
pub fn enter_setup(session: &mut HostedSession) -> Result<(), GameError> {
    let from = session.game.status();
    session.game.set_status(GameStatus::Setup)?;

    if from == GameStatus::Menu {
        session.setup = SetupDraft::new(session.game.impostor_count());
    }

    Ok(())
}

/// Apply a manual status change, routing setup entry through [`enter_setup`]
pub fn change_status(session: &mut HostedSession, status: GameStatus) -> Result<(), GameError> {
    match status {
        GameStatus::Setup => enter_setup(session),
        other => session.game.set_status(other),
    }
}

/// Draw a word for the draft's category and deal the game
///
/// # Errors
///
/// Returns an error if the session is not in setup or the draft's split is
/// invalid; no word is drawn in that case.
pub fn start_from_setup(
    session: &mut HostedSession,
    word_provider: &dyn WordProvider,
) -> Result<(), GameError> {
    if session.game.status() != GameStatus::Setup {
        return Err(GameError::InvalidTransition {
            from: session.game.status(),
            to: GameStatus::Pass,
        });
    }

    let draft = &session.setup;
    validate_distribution(draft.player_names().len(), draft.impostor_count())?;

    let word = word_provider.random_word(draft.category());
    tracing::debug!(
        "Session {} starting with category {}",
        session.id,
        draft.category().as_str()
    );

    session
        .game
        .start_game(draft.player_names().to_vec(), draft.impostor_count(), word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, SessionManager, IMPOSTOR_WORD};

    struct FixedWord(&'static str);

    impl WordProvider for FixedWord {
        fn random_word(&self, _category: Category) -> String {
            self.0.to_string()
        }
    }

    fn create_test_session() -> HostedSession {
        let mut manager = SessionManager::new();
        let session_id = manager.create_session();
        manager.get_session(&session_id).unwrap().clone()
    }

    #[test]
    fn test_cannot_edit_setup_from_menu() {
        let session = create_test_session();

        let (can, err) = can_edit_setup(&session);
        assert!(!can);
        assert!(err.contains("setup screen"));
    }

    #[test]
    fn test_enter_setup_resets_draft_with_sticky_count() {
        let mut session = create_test_session();

        enter_setup(&mut session).unwrap();
        session.setup.add_player().unwrap();
        session.setup.set_impostor_count(3);
        start_from_setup(&mut session, &FixedWord("Park")).unwrap();

        session.game.reset_game();
        enter_setup(&mut session).unwrap();

        assert_eq!(session.setup.player_names().len(), 3);
        assert_eq!(session.setup.impostor_count(), 2);
        assert!(can_edit_setup(&session).0);
    }

    #[test]
    fn test_reentering_setup_keeps_draft() {
        let mut session = create_test_session();

        enter_setup(&mut session).unwrap();
        session.setup.rename_player(0, "Zed").unwrap();
        enter_setup(&mut session).unwrap();

        assert_eq!(session.setup.player_names()[0], "Zed");
    }

    #[test]
    fn test_can_start_game() {
        let mut session = create_test_session();

        let (can, err) = can_start_game(&session);
        assert!(!can);
        assert_eq!(err, "Game can only be started from setup");

        enter_setup(&mut session).unwrap();
        let (can, err) = can_start_game(&session);
        assert!(can);
        assert_eq!(err, "");
    }

    #[test]
    fn test_start_from_setup_uses_provider_word() {
        let mut session = create_test_session();
        enter_setup(&mut session).unwrap();

        start_from_setup(&mut session, &FixedWord("Lion")).unwrap();

        assert_eq!(session.game.status(), GameStatus::Pass);
        assert_eq!(session.game.common_word(), "Lion");
        for player in session.game.players() {
            if player.is_impostor() {
                assert_eq!(player.word, IMPOSTOR_WORD);
            } else {
                assert_eq!(player.word, "Lion");
            }
        }
    }

    #[test]
    fn test_start_from_menu_rejected() {
        let mut session = create_test_session();

        let result = start_from_setup(&mut session, &FixedWord("Lion"));
        assert!(matches!(result, Err(GameError::InvalidTransition { .. })));
    }

    #[test]
    fn test_can_disclose_word_only_while_playing() {
        let mut session = create_test_session();
        enter_setup(&mut session).unwrap();
        start_from_setup(&mut session, &FixedWord("Lion")).unwrap();

        assert!(!can_disclose_word(&session).0);

        while session.game.status() != GameStatus::Playing {
            session.game.next_player().unwrap();
        }
        assert!(can_disclose_word(&session).0);
    }

    #[test]
    fn test_change_status_escape_hatch() {
        let mut session = create_test_session();

        change_status(&mut session, GameStatus::Setup).unwrap();
        change_status(&mut session, GameStatus::Menu).unwrap();
        assert_eq!(session.game.status(), GameStatus::Menu);

        assert!(change_status(&mut session, GameStatus::Finished).is_err());
    }
}
