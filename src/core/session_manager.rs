use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};

use super::{GameSession, GameStatus, SetupDraft, SESSION_ID_LENGTH};

/// One device's game plus the setup screen it is editing
#[derive(Debug, Clone)]
pub struct HostedSession {
    pub id: String,
    pub game: GameSession,
    pub setup: SetupDraft,
    pub created_at: OffsetDateTime,
    pub last_active_at: OffsetDateTime,
}

impl HostedSession {
    fn new(id: String) -> Self {
        let now = OffsetDateTime::now_utc();
        let game = GameSession::new();
        let setup = SetupDraft::new(game.impostor_count());

        Self {
            id,
            game,
            setup,
            created_at: now,
            last_active_at: now,
        }
    }

    /// Record activity so the session is not reaped while in use
    pub fn touch(&mut self) {
        self.last_active_at = OffsetDateTime::now_utc();
    }
}

/// Owns every hosted session, keyed by session id
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<String, HostedSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Create a session on the menu screen
    ///
    /// # Returns
    ///
    /// The new session's id
    pub fn create_session(&mut self) -> String {
        let mut session_id = Self::generate_session_id();
        while self.sessions.contains_key(&session_id) {
            session_id = Self::generate_session_id();
        }

        self.sessions
            .insert(session_id.clone(), HostedSession::new(session_id.clone()));
        tracing::info!("Created session {}", session_id);
        session_id
    }

    /// URL-safe id from the OS random source
    fn generate_session_id() -> String {
        use rand::rngs::OsRng;

        OsRng
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LENGTH)
            .map(char::from)
            .collect()
    }

    pub fn get_session(&self, session_id: &str) -> Option<&HostedSession> {
        self.sessions.get(session_id)
    }

    /// Mutable access, marking the session as active
    pub fn get_session_mut(&mut self, session_id: &str) -> Option<&mut HostedSession> {
        let session = self.sessions.get_mut(session_id)?;
        session.touch();
        Some(session)
    }

    pub fn remove_session(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `ttl`
    ///
    /// # Returns
    ///
    /// Number of sessions removed
    pub fn cleanup_idle_sessions(&mut self, ttl: Duration) -> usize {
        let cutoff = OffsetDateTime::now_utc() - ttl;
        let before = self.sessions.len();

        self.sessions
            .retain(|_, session| session.last_active_at >= cutoff);

        let removed = before - self.sessions.len();
        if removed > 0 {
            tracing::info!("Removed {} idle sessions", removed);
        }
        removed
    }

    /// Counts of hosted sessions, overall and per status
    pub fn get_stats(&self) -> serde_json::Value {
        let mut by_status: HashMap<&'static str, usize> = HashMap::new();
        for session in self.sessions.values() {
            *by_status.entry(session.game.status().as_str()).or_insert(0) += 1;
        }

        let in_game = self
            .sessions
            .values()
            .filter(|s| s.game.status().is_in_game())
            .count();
        let total_players: usize = self
            .sessions
            .values()
            .map(|s| s.game.players().len())
            .sum();

        serde_json::json!({
            "total_sessions": self.sessions.len(),
            "sessions_in_game": in_game,
            "total_players": total_players,
            "by_status": by_status,
        })
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session() {
        let mut manager = SessionManager::new();

        let session_id = manager.create_session();
        let session = manager.get_session(&session_id).unwrap();

        assert_eq!(session.id, session_id);
        assert_eq!(session.game.status(), GameStatus::Menu);
        assert_eq!(session.setup, SetupDraft::default());
    }

    #[test]
    fn test_get_nonexistent_session() {
        let manager = SessionManager::new();
        assert!(manager.get_session("nonexistent").is_none());
    }

    #[test]
    fn test_remove_session() {
        let mut manager = SessionManager::new();
        let session_id = manager.create_session();

        manager.remove_session(&session_id);

        assert!(manager.get_session(&session_id).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_session_id_format() {
        let mut manager = SessionManager::new();

        let first = manager.create_session();
        let second = manager.create_session();

        assert_ne!(first, second);
        assert_eq!(first.len(), SESSION_ID_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_cleanup_idle_sessions() {
        let mut manager = SessionManager::new();
        let stale = manager.create_session();
        let fresh = manager.create_session();

        if let Some(session) = manager.sessions.get_mut(&stale) {
            session.last_active_at = OffsetDateTime::now_utc() - Duration::hours(2);
        }

        let removed = manager.cleanup_idle_sessions(Duration::hours(1));

        assert_eq!(removed, 1);
        assert!(manager.get_session(&stale).is_none());
        assert!(manager.get_session(&fresh).is_some());
    }

    #[test]
    fn test_get_session_mut_refreshes_activity() {
        let mut manager = SessionManager::new();
        let session_id = manager.create_session();

        if let Some(session) = manager.sessions.get_mut(&session_id) {
            session.last_active_at = OffsetDateTime::now_utc() - Duration::hours(2);
        }
        manager.get_session_mut(&session_id).unwrap();

        assert_eq!(manager.cleanup_idle_sessions(Duration::hours(1)), 0);
    }

    #[test]
    fn test_get_stats() {
        let mut manager = SessionManager::new();
        let stats = manager.get_stats();
        assert_eq!(stats["total_sessions"], 0);

        let playing = manager.create_session();
        manager.create_session();

        let session = manager.get_session_mut(&playing).unwrap();
        session.game.set_status(GameStatus::Setup).unwrap();
        session
            .game
            .start_game(
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                1,
                "Cat".to_string(),
            )
            .unwrap();

        let stats = manager.get_stats();
        assert_eq!(stats["total_sessions"], 2);
        assert_eq!(stats["sessions_in_game"], 1);
        assert_eq!(stats["total_players"], 3);
        assert_eq!(stats["by_status"]["menu"], 1);
        assert_eq!(stats["by_status"]["pass"], 1);
    }
}
