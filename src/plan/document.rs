//! Approved care plan export

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::ClinicSettings;
use crate::plan::{ApprovedPlan, PatientInput};
use crate::Result;

const DOCUMENT_TITLE: &str = "Your Personalized Care Plan";

/// Output format for an exported care plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Txt,
    Markdown,
    Json,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

/// A care plan ready to be written out
pub struct CarePlanDocument<'a> {
    pub patient: &'a PatientInput,
    pub plan: &'a ApprovedPlan,
    pub clinic: &'a ClinicSettings,
    pub generated_on: NaiveDate,
}

impl<'a> CarePlanDocument<'a> {
    pub fn new(
        patient: &'a PatientInput,
        plan: &'a ApprovedPlan,
        clinic: &'a ClinicSettings,
    ) -> Self {
        Self {
            patient,
            plan,
            clinic,
            generated_on: Local::now().date_naive(),
        }
    }

    pub fn render(&self, format: DocumentFormat) -> Result<String> {
        match format {
            DocumentFormat::Txt => Ok(self.render_txt()),
            DocumentFormat::Markdown => Ok(self.render_markdown()),
            DocumentFormat::Json => self.render_json(),
        }
    }

    /// Download file name, e.g. `care_plan_Jane_Doe.txt`
    pub fn file_name(&self, format: DocumentFormat) -> String {
        let name: String = self
            .patient
            .name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if name.is_empty() {
            format!("care_plan.{}", format.extension())
        } else {
            format!("care_plan_{}.{}", name, format.extension())
        }
    }

    fn render_txt(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.clinic.name));
        output.push_str(&format!("{}\n", DOCUMENT_TITLE));
        output.push_str(&format!("Date: {}\n", self.generated_on.format("%Y-%m-%d")));
        output.push_str("\n---\n\n");

        output.push_str(&format!("Name: {}\n", self.patient.name));
        output.push_str(&format!("Date of Birth: {}\n", self.patient.date_of_birth));
        output.push_str(&format!("Current Service: {}\n\n", self.patient.service));

        push_section(&mut output, "Goals", self.patient.goals(), |_| "- ".to_string());
        push_section(&mut output, "Objectives", self.patient.objectives(), |_| {
            "- ".to_string()
        });
        push_section(
            &mut output,
            "Your Personalized Plan",
            self.plan.plan().iter().map(String::as_str),
            |i| format!("{}. ", i + 1),
        );
        push_section(
            &mut output,
            "Healthy Solutions",
            self.plan.healthy_solutions().iter().map(String::as_str),
            |_| "• ".to_string(),
        );

        if !self.clinic.footer.trim().is_empty() {
            output.push_str("---\n");
            output.push_str(self.clinic.footer.trim());
            output.push('\n');
        }

        output
    }

    fn render_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", DOCUMENT_TITLE));
        output.push_str(&format!(
            "_{} | {}_\n\n",
            self.clinic.name,
            self.generated_on.format("%Y-%m-%d")
        ));

        output.push_str("| | |\n|---|---|\n");
        output.push_str(&format!("| **Name** | {} |\n", self.patient.name));
        output.push_str(&format!(
            "| **Date of Birth** | {} |\n",
            self.patient.date_of_birth
        ));
        output.push_str(&format!(
            "| **Current Service** | {} |\n\n",
            self.patient.service
        ));

        push_section(&mut output, "## Goals", self.patient.goals(), |_| {
            "- ".to_string()
        });
        push_section(&mut output, "## Objectives", self.patient.objectives(), |_| {
            "- ".to_string()
        });
        push_section(
            &mut output,
            "## Your Personalized Plan",
            self.plan.plan().iter().map(String::as_str),
            |i| format!("{}. ", i + 1),
        );
        push_section(
            &mut output,
            "## Healthy Solutions",
            self.plan.healthy_solutions().iter().map(String::as_str),
            |_| "- ".to_string(),
        );

        if !self.clinic.footer.trim().is_empty() {
            output.push_str("---\n\n");
            output.push_str(self.clinic.footer.trim());
            output.push('\n');
        }

        output
    }

    fn render_json(&self) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExportData<'a> {
            clinic: &'a str,
            generated_on: NaiveDate,
            patient: &'a PatientInput,
            #[serde(flatten)]
            plan: &'a ApprovedPlan,
        }

        let data = ExportData {
            clinic: &self.clinic.name,
            generated_on: self.generated_on,
            patient: self.patient,
            plan: self.plan,
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}

fn push_section<'a>(
    output: &mut String,
    heading: &str,
    items: impl Iterator<Item = &'a str>,
    prefix: impl Fn(usize) -> String,
) {
    output.push_str(heading);
    output.push_str("\n\n");

    let mut empty = true;
    for (i, item) in items.enumerate() {
        empty = false;
        output.push_str(&prefix(i));
        output.push_str(item);
        output.push('\n');
    }
    if empty {
        output.push_str("None\n");
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{GeneratedPlan, ReviewDraft};

    fn patient() -> PatientInput {
        PatientInput {
            name: "Jane O'Doe".to_string(),
            date_of_birth: "1985-07-14".to_string(),
            service: "Weight Loss".to_string(),
            goals: vec!["Lose 30 lbs".to_string()],
            objectives: vec!["Walk daily".to_string()],
        }
    }

    fn approved() -> ApprovedPlan {
        let mut draft = ReviewDraft::from(GeneratedPlan {
            plan: vec!["Start semaglutide".into(), "Dropped".into()],
            healthy_solutions: vec!["Drink water".into()],
        });
        draft.plan.toggle(1).unwrap();
        draft.approve()
    }

    fn document<'a>(
        patient: &'a PatientInput,
        plan: &'a ApprovedPlan,
        clinic: &'a ClinicSettings,
    ) -> CarePlanDocument<'a> {
        CarePlanDocument {
            patient,
            plan,
            clinic,
            generated_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn txt_lists_only_approved_items() {
        let (patient, plan) = (patient(), approved());
        let clinic = ClinicSettings {
            footer: "555-0100 | clinic.example".to_string(),
            ..ClinicSettings::default()
        };

        let text = document(&patient, &plan, &clinic)
            .render(DocumentFormat::Txt)
            .unwrap();

        assert!(text.contains("Your Personalized Care Plan"));
        assert!(text.contains("Date: 2024-05-01"));
        assert!(text.contains("Name: Jane O'Doe\n"));
        assert!(text.contains("Current Service: Weight Loss\n"));
        assert!(text.contains("Your Personalized Plan\n\n1. Start semaglutide\n\n"));
        assert!(text.contains("• Drink water\n"));
        assert!(!text.contains("Dropped"));
        assert!(text.ends_with("555-0100 | clinic.example\n"));
    }

    #[test]
    fn empty_section_renders_none() {
        let patient = patient();
        let plan = ApprovedPlan::default();
        let clinic = ClinicSettings::default();

        let text = document(&patient, &plan, &clinic)
            .render(DocumentFormat::Markdown)
            .unwrap();
        assert!(text.contains("## Your Personalized Plan\n\nNone\n"));
        assert!(text.contains("## Healthy Solutions\n\nNone\n"));
    }

    #[test]
    fn json_export_flattens_plan() {
        let (patient, plan) = (patient(), approved());
        let clinic = ClinicSettings::default();

        let json = document(&patient, &plan, &clinic)
            .render(DocumentFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["generatedOn"], "2024-05-01");
        assert_eq!(value["patient"]["dob"], "1985-07-14");
        assert_eq!(value["plan"][0], "Start semaglutide");
        assert_eq!(value["healthySolutions"][0], "Drink water");
    }

    #[test]
    fn file_name_is_sanitized() {
        let (patient, plan) = (patient(), approved());
        let clinic = ClinicSettings::default();
        let doc = document(&patient, &plan, &clinic);

        assert_eq!(doc.file_name(DocumentFormat::Txt), "care_plan_Jane_O_Doe.txt");
        assert_eq!(doc.file_name(DocumentFormat::Markdown), "care_plan_Jane_O_Doe.md");

        let anonymous = PatientInput::default();
        let doc = document(&anonymous, &plan, &clinic);
        assert_eq!(doc.file_name(DocumentFormat::Json), "care_plan.json");
    }
}
