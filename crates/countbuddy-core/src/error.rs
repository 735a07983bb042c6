//! Engine error types.
//!
//! Only validation and navigation misuse surface as errors; persistence
//! failures are logged by the store and never reach the caller.

use thiserror::Error;
use uuid::Uuid;

/// Errors reported synchronously to the action that caused them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Profile name was empty or whitespace only.
    #[error("please fill in a name")]
    EmptyName,

    /// Profile age was not given.
    #[error("please fill in an age")]
    MissingAge,

    /// No profile with this id exists.
    #[error("profile not found: {0}")]
    UnknownProfile(Uuid),

    /// The action has no transition from the current screen.
    #[error("cannot {action} on the {screen} screen")]
    InvalidTransition {
        screen: &'static str,
        action: &'static str,
    },

    /// The in-game action does not apply to the active game mode.
    #[error("{action} is not available in {mode}")]
    UnsupportedAction {
        mode: &'static str,
        action: &'static str,
    },
}

impl EngineError {
    /// Returns `true` for errors caused by bad user input rather than misuse
    /// of the engine API.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::EmptyName | EngineError::MissingAge)
    }
}
