//! countbuddy-core: Learning session engine, rounds, and profile store.
//!
//! This crate defines the child profile model, the per-mode round generators,
//! the timed feedback sequencing, and the navigation state machine that the
//! countbuddy front-ends drive.

pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod rounds;
pub mod session;
pub mod store;
pub mod timeline;

pub use error::EngineError;
pub use model::{Avatar, GameMode, GameStats, Profile};
pub use navigation::{Action, App, Screen};
pub use session::{Feedback, Game, GameSession};
pub use store::ProfileStore;
