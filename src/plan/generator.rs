//! Care plan generation: validate, prompt, complete, parse

use crate::llm::{build_plan_prompt, parse_completion, LlmProvider};
use crate::plan::{GeneratedPlan, PatientInput};
use crate::{CarePlanError, Result};

/// Generate a draft care plan for a patient.
///
/// Invalid input is rejected before any external call. A provider failure is
/// surfaced as-is with no retry, and a completion that does not follow the
/// expected format fails as a whole.
pub async fn generate_plan(
    provider: &dyn LlmProvider,
    patient: &PatientInput,
) -> Result<GeneratedPlan> {
    patient.validate()?;

    let prompt = build_plan_prompt(patient);
    tracing::info!(
        provider = provider.name(),
        service = %patient.service,
        goals = patient.goals().count(),
        objectives = patient.objectives().count(),
        "Generating care plan"
    );

    let completion = provider.complete(&prompt).await.map_err(|e| {
        tracing::error!("Generation request failed: {:#}", e);
        CarePlanError::Upstream(format!("{:#}", e))
    })?;

    if completion.trim().is_empty() {
        tracing::error!("Generation service returned an empty completion");
        return Err(CarePlanError::Upstream(
            "No response generated from the language model".to_string(),
        ));
    }

    tracing::debug!("Generated text:\n{}", completion);

    let plan = parse_completion(&completion).inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    tracing::info!(
        plan_items = plan.plan.len(),
        solution_items = plan.healthy_solutions.len(),
        "Care plan generated"
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedProvider {
        response: anyhow::Result<String>,
        calls: AtomicUsize,
    }

    impl CannedProvider {
        fn ok(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(anyhow::anyhow!(message.to_string())),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow::anyhow!(e.to_string())),
            }
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    fn patient() -> PatientInput {
        PatientInput {
            name: "Jane Doe".to_string(),
            date_of_birth: "1985-07-14".to_string(),
            service: "HRT".to_string(),
            goals: vec!["Feel less tired".to_string()],
            objectives: vec!["Recheck estradiol".to_string()],
        }
    }

    #[tokio::test]
    async fn returns_parsed_plan() {
        let provider = CannedProvider::ok(
            "Personalized Plan:\n1. A\n2. B\nHealthy Solutions:\n1. C",
        );

        let plan = generate_plan(&provider, &patient()).await.unwrap();
        assert_eq!(plan.plan, vec!["A", "B"]);
        assert_eq!(plan.healthy_solutions, vec!["C"]);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_provider() {
        let provider = CannedProvider::ok("unused");
        let mut input = patient();
        input.objectives.clear();

        let err = generate_plan(&provider, &input).await.unwrap_err();
        assert!(matches!(err, CarePlanError::Validation(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_error_without_retry() {
        let provider = CannedProvider::failing("connection refused");

        let err = generate_plan(&provider, &patient()).await.unwrap_err();
        match err {
            CarePlanError::Upstream(message) => assert!(message.contains("connection refused")),
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_completion_is_upstream_error() {
        let provider = CannedProvider::ok("   \n");

        let err = generate_plan(&provider, &patient()).await.unwrap_err();
        assert!(matches!(err, CarePlanError::Upstream(_)));
    }

    #[tokio::test]
    async fn malformed_completion_is_parse_error() {
        let provider = CannedProvider::ok("Here are some ideas:\n1. A\n2. B");

        let err = generate_plan(&provider, &patient()).await.unwrap_err();
        assert!(matches!(err, CarePlanError::Parse(_)));
    }
}
