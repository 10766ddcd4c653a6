//! Configuration module for careplan
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{
    AccessSettings, ClinicSettings, GeneralSettings, LlmSettings, ServerSettings, Settings,
    API_KEY_ENV, PASSWORD_ENV,
};
