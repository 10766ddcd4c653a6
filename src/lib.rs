//! careplan - A small clinic tool for drafting care plans with an LLM
//!
//! Staff submit patient intake data, the data is turned into a prompt for a
//! text-generation service, the completion is parsed into a personalized plan
//! and a list of healthy solutions, and an approved plan can be exported as a
//! document.

pub mod access;
pub mod cli;
pub mod config;
pub mod llm;
pub mod plan;
pub mod server;

use thiserror::Error;

/// Main error type for careplan
#[derive(Error, Debug)]
pub enum CarePlanError {
    #[error("Server configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Generation service error: {0}")]
    Upstream(String),

    #[error("Could not parse generated content: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CarePlanError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "careplan";
