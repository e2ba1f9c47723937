pub mod game_state;

pub use game_state::{
    can_disclose_word, can_edit_setup, can_start_game, change_status, enter_setup,
    start_from_setup,
};
