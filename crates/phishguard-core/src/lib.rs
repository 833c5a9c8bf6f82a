//! PhishGuard Core
//!
//! Core types shared across PhishGuard components.
//!
//! This crate provides:
//! - The error taxonomy and `Result` alias used by every crate
//! - The `Label` verdict and the `PredictionResult` returned by inference

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Label, PredictionResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Label, PredictionResult};
}
