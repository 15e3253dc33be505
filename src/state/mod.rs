pub mod app_state;
pub mod navigator;

pub use app_state::AppState;
pub use navigator::{Navigator, SessionState};
