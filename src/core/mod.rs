pub mod constants;
pub mod error;
pub mod game_session;
pub mod player;
pub mod roles;
pub mod session_manager;
pub mod setup;
pub mod words;

pub use constants::*;
pub use error::GameError;
pub use game_session::{GameSession, GameStatus};
pub use player::{Player, Role};
pub use roles::{assign_roles, pick_impostor_seats, validate_distribution};
pub use session_manager::{HostedSession, SessionManager};
pub use setup::{validate_player_name, SetupDraft};
pub use words::{Category, StaticWordProvider, WordProvider};
