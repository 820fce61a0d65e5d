//! Session events and the topic-based bus that fans them out.
//!
//! The session records [`GameEvent`]s into an [`EventLog`] while a command is
//! handled; the worker drains the log and publishes each event on its
//! [`Topic`].

mod bus;
mod log;
mod types;

pub use bus::{EventBus, Topic};
pub use log::EventLog;
pub use types::GameEvent;
