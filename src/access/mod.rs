//! Shared-password access gate
//!
//! A single secret, loaded once from settings, gates every operation except
//! the password check itself. Comparison is plain equality.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::{CarePlanError, Result};

/// Header carrying the shared password on gated requests
pub const PASSWORD_HEADER: &str = "x-app-password";

const UNSET_MESSAGE: &str = "Server configuration error: APP password is not set";

/// Outcome of a password check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCheck {
    pub success: bool,
    pub message: String,
}

impl AccessCheck {
    fn granted() -> Self {
        Self {
            success: true,
            message: "Password correct".to_string(),
        }
    }

    fn denied(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.access.password.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a caller-supplied password.
    pub fn check(&self, supplied: &str) -> AccessCheck {
        match self.secret.as_deref() {
            None => {
                tracing::error!("Access password is not configured");
                AccessCheck::denied(UNSET_MESSAGE)
            }
            Some(secret) if secret == supplied => {
                tracing::debug!("Password match successful");
                AccessCheck::granted()
            }
            Some(_) => {
                tracing::info!("Password match failed");
                AccessCheck::denied("Invalid password")
            }
        }
    }

    /// Authorize a gated operation from an optional header value.
    pub fn authorize(&self, supplied: Option<&str>) -> Result<()> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| CarePlanError::Config("APP password is not set".to_string()))?;

        match supplied {
            Some(value) if value == secret => Ok(()),
            _ => Err(CarePlanError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_secret_reports_configuration_error_for_any_value() {
        let gate = AccessGate::new(None);

        for supplied in ["", "anything", "Password correct"] {
            let check = gate.check(supplied);
            assert!(!check.success);
            assert!(check.message.contains("configuration error"));
        }
    }

    #[test]
    fn matching_and_mismatching_values() {
        let gate = AccessGate::new(Some("s3cret".to_string()));

        assert_eq!(gate.check("s3cret"), AccessCheck::granted());

        let denied = gate.check("S3CRET");
        assert!(!denied.success);
        assert_eq!(denied.message, "Invalid password");
    }

    #[test]
    fn check_is_idempotent() {
        let gate = AccessGate::new(Some("s3cret".to_string()));

        assert_eq!(gate.check("s3cret"), gate.check("s3cret"));
        assert_eq!(gate.check("nope"), gate.check("nope"));
    }

    #[test]
    fn empty_secret_is_still_configured() {
        let gate = AccessGate::new(Some(String::new()));

        assert!(gate.is_configured());
        assert!(gate.check("").success);
    }

    #[test]
    fn authorize_distinguishes_unset_from_wrong() {
        let unset = AccessGate::new(None);
        assert!(matches!(
            unset.authorize(Some("x")),
            Err(CarePlanError::Config(_))
        ));

        let gate = AccessGate::new(Some("s3cret".to_string()));
        assert!(gate.authorize(Some("s3cret")).is_ok());
        assert!(matches!(
            gate.authorize(Some("wrong")),
            Err(CarePlanError::Unauthorized)
        ));
        assert!(matches!(
            gate.authorize(None),
            Err(CarePlanError::Unauthorized)
        ));
    }
}
