//! Completion parsing
//!
//! The model is asked to answer with two literal headers followed by numbered
//! lines. Matching is strict: headers are case-sensitive and any deviation
//! fails the whole parse.

use crate::llm::prompts::{PLAN_HEADER, SOLUTIONS_HEADER};
use crate::plan::GeneratedPlan;
use crate::{CarePlanError, Result};

const LIST_MARKERS: &[char] = &['*', '-', '•'];

/// Parse a completion into a plan and healthy solutions.
pub fn parse_completion(text: &str) -> Result<GeneratedPlan> {
    let plan = plan_block(text).map(split_items).unwrap_or_default();
    let healthy_solutions = solutions_block(text).map(split_items).unwrap_or_default();

    if plan.is_empty() || healthy_solutions.is_empty() {
        return Err(CarePlanError::Parse(
            "Failed to parse the generated plan or healthy solutions".to_string(),
        ));
    }

    Ok(GeneratedPlan {
        plan,
        healthy_solutions,
    })
}

/// Text between the plan header and the first solutions header after it.
fn plan_block(text: &str) -> Option<&str> {
    let start = text.find(PLAN_HEADER)? + PLAN_HEADER.len();
    let rest = &text[start..];
    let end = rest.find(SOLUTIONS_HEADER)?;
    Some(&rest[..end])
}

/// Text after the first solutions header.
fn solutions_block(text: &str) -> Option<&str> {
    let start = text.find(SOLUTIONS_HEADER)? + SOLUTIONS_HEADER.len();
    Some(&text[start..])
}

fn split_items(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_prefix)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip a leading `12.` ordinal or a single list marker.
fn strip_list_prefix(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest.trim_start();
        }
    }

    match line.strip_prefix(LIST_MARKERS) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_sections() {
        let plan =
            parse_completion("Personalized Plan:\n1. A\n2. B\nHealthy Solutions:\n1. C").unwrap();

        assert_eq!(plan.plan, vec!["A", "B"]);
        assert_eq!(plan.healthy_solutions, vec!["C"]);
    }

    #[test]
    fn strips_bullets_and_skips_blank_lines() {
        let text = "Sure! Here is the plan.\n\n\
Personalized Plan:\n\n\
1. Start semaglutide titration\n\
   2.   Recheck labs at 6 weeks  \n\n\
Healthy Solutions:\n\
* Drink more water\n\
- Walk 20 minutes daily\n\
• Reach out to our team for any support or questions. We are here to help! - Kayla\n";

        let plan = parse_completion(text).unwrap();
        assert_eq!(
            plan.plan,
            vec!["Start semaglutide titration", "Recheck labs at 6 weeks"]
        );
        assert_eq!(
            plan.healthy_solutions,
            vec![
                "Drink more water",
                "Walk 20 minutes daily",
                "Reach out to our team for any support or questions. We are here to help! - Kayla",
            ]
        );
    }

    #[test]
    fn keeps_numbers_that_are_not_ordinals() {
        let text = "Personalized Plan:\n1. Take 5,000 IU/day\nHealthy Solutions:\n2000 steps a day";
        let plan = parse_completion(text).unwrap();

        assert_eq!(plan.plan, vec!["Take 5,000 IU/day"]);
        assert_eq!(plan.healthy_solutions, vec!["2000 steps a day"]);
    }

    #[test]
    fn missing_solutions_header_fails() {
        let err = parse_completion("Personalized Plan:\n1. A\n2. B\n").unwrap_err();
        assert!(matches!(err, CarePlanError::Parse(_)));
    }

    #[test]
    fn blank_plan_block_fails_even_with_solutions() {
        let err =
            parse_completion("Personalized Plan:\n\n   \n\nHealthy Solutions:\n1. C").unwrap_err();
        assert!(matches!(err, CarePlanError::Parse(_)));
    }

    #[test]
    fn headers_are_case_sensitive() {
        let err = parse_completion("personalized plan:\n1. A\nhealthy solutions:\n1. C").unwrap_err();
        assert!(matches!(err, CarePlanError::Parse(_)));
    }

    #[test]
    fn alternate_wording_is_not_recovered() {
        let err = parse_completion("Plan:\n1. A\nHealthy Solutions:\n1. C").unwrap_err();
        assert!(matches!(err, CarePlanError::Parse(_)));
    }

    #[test]
    fn solutions_before_plan_header_fails() {
        let err = parse_completion("Healthy Solutions:\n1. C\nPersonalized Plan:\n1. A").unwrap_err();
        assert!(matches!(err, CarePlanError::Parse(_)));
    }

    #[test]
    fn ordinal_only_lines_are_dropped() {
        let plan =
            parse_completion("Personalized Plan:\n1.\n2. B\nHealthy Solutions:\n-\n1. C").unwrap();
        assert_eq!(plan.plan, vec!["B"]);
        assert_eq!(plan.healthy_solutions, vec!["C"]);
    }
}
