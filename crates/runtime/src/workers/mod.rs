//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the [`crate::Session`] and executes gameplay
//! commands one at a time.

mod session;

pub use session::{Command, SessionWorker};
