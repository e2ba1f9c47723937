pub mod requests;
pub mod responses;

pub use requests::{RenamePlayerRequest, SetStatusRequest, UpdateSetupRequest};
pub use responses::{
    CardResponse, CreateSessionResponse, PlayerSummary, SessionStateResponse, SetupResponse,
    WordResponse,
};
