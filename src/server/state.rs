//! Shared, read-only server state

use std::sync::Arc;

use crate::access::AccessGate;
use crate::config::Settings;
use crate::llm::{build_provider, LlmProvider};
use crate::{CarePlanError, Result};

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gate: Arc<AccessGate>,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        gate: AccessGate,
        provider: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            gate: Arc::new(gate),
            provider,
        }
    }

    /// Build state from settings. A provider that cannot be built is logged
    /// and reported on every generation request instead of failing startup.
    pub fn from_settings(settings: Settings) -> Self {
        let gate = AccessGate::from_settings(&settings);
        if !gate.is_configured() {
            tracing::warn!("Access password is not set; gated requests will fail");
        }

        let provider = match build_provider(&settings) {
            Ok(provider) => Some(Arc::from(provider)),
            Err(e) => {
                tracing::warn!("LLM provider unavailable: {:#}", e);
                None
            }
        };

        Self::new(settings, gate, provider)
    }

    pub fn provider(&self) -> Result<&dyn LlmProvider> {
        self.provider.as_deref().ok_or_else(|| {
            CarePlanError::Config(
                "language model provider is not configured; set llm.api_key or CAREPLAN_LLM_API_KEY"
                    .to_string(),
            )
        })
    }
}
