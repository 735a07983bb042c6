//! countbuddy-progress: Remote progress records for countbuddy.
//!
//! A small CRUD service keeping one progress record per child, keyed by a
//! unique kid name, plus a typed HTTP client for it. The learning engine in
//! `countbuddy-core` does not talk to this service.

pub mod client;
pub mod error;
pub mod record;
pub mod server;
pub mod store;

pub use client::ProgressClient;
pub use error::ProgressError;
pub use record::{NewKid, ProgressRecord, ProgressUpdate};
pub use server::{router, serve};
pub use store::{MemoryProgressStore, ProgressStore};
