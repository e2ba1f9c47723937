/// Smallest roster a game can be started with
pub const MIN_PLAYERS: usize = 3;

/// Largest roster the setup draft will grow to
pub const MAX_PLAYERS: usize = 20;

/// Word shown to impostors instead of the common word
pub const IMPOSTOR_WORD: &str = "IMPOSTOR";

/// Impostor count a fresh session starts with
pub const DEFAULT_IMPOSTOR_COUNT: usize = 1;

/// Maximum length of a player name after trimming
pub const MAX_NAME_LENGTH: usize = 20;

/// Idle sessions are dropped after this many seconds (1 hour)
pub const SESSION_TTL_SECONDS: u64 = 3600;

/// Length of generated session identifiers
pub const SESSION_ID_LENGTH: usize = 12;
