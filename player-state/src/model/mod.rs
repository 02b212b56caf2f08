//! Model types for the player state

mod playback_status;
mod player_state;
mod state_change;

pub use playback_status::PlaybackStatus;
pub use player_state::PlayerState;
pub use state_change::StateChange;
