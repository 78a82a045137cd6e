//! Error types for the loading and export boundary
//!
//! The generation core itself never fails: missing or malformed inputs are
//! defaulted or absorbed locally. Errors only arise when reading profile
//! files or exporting scenes.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Profile error: {0}")]
    Profile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
