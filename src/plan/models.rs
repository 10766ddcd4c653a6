//! Intake and generated plan records

use serde::{Deserialize, Serialize};

use crate::{CarePlanError, Result};

/// Patient intake data collected before generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInput {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "dob", alias = "dateOfBirth")]
    pub date_of_birth: String,

    /// Service the patient is currently receiving
    #[serde(default)]
    pub service: String,

    #[serde(default)]
    pub goals: Vec<String>,

    #[serde(default)]
    pub objectives: Vec<String>,
}

impl PatientInput {
    /// Goals with blank entries skipped
    pub fn goals(&self) -> impl Iterator<Item = &str> {
        non_blank(&self.goals)
    }

    /// Objectives with blank entries skipped
    pub fn objectives(&self) -> impl Iterator<Item = &str> {
        non_blank(&self.objectives)
    }

    /// Reject input that lacks at least one goal and one objective.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.goals().next().is_none() {
            missing.push("goals");
        }
        if self.objectives().next().is_none() {
            missing.push("objectives");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CarePlanError::Validation(format!(
                "missing required field: {}",
                missing.join(", ")
            )))
        }
    }
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items
        .iter()
        .map(String::as_str)
        .filter(|item| !item.trim().is_empty())
}

/// The two ordered lists parsed from a completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub plan: Vec<String>,
    pub healthy_solutions: Vec<String>,
}
