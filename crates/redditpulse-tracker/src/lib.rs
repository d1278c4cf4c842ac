/*
[INPUT]:  Public API exports for redditpulse-tracker crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod session;

// Re-export main types for convenience
pub use client::TaskClient;
pub use config::TrackerConfig;
pub use error::TrackerError;
pub use poller::PollOutcome;
pub use session::{ActiveTask, HISTORY_CAPACITY, SessionSnapshot, SessionStore};
