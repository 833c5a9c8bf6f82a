//! PhishGuard command-line front end
//!
//! Thin I/O layer over `phishguard-classifiers`: reads the app
//! configuration, loads the selected model once, analyzes email text and
//! renders the verdict or a plain-text report.

pub mod cli;
pub mod config;
pub mod input;
pub mod report;
pub mod session;

pub use cli::*;
pub use config::AppConfig;
pub use session::Session;
