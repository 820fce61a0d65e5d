//! Headless line-driven client for the warrior-versus-monsters game.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ ClientConfig   (environment)
//!   ├─→ logging        (tracing file sink)
//!   ├─→ ContentFactory (data directory)
//!   ├─→ Runtime        (session worker + save repository)
//!   └─→ App            (stdin commands → RuntimeHandle)
//! ```

pub mod app;
pub mod commands;
pub mod config;
pub mod dirs;
pub mod logging;

pub use app::App;
pub use commands::{ClientCommand, ParseError};
pub use config::ClientConfig;
