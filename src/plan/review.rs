//! Review state for a generated plan
//!
//! Each list item carries its own approval flag so edits, deletions and
//! additions can never desynchronize text and approval.

use serde::{Deserialize, Serialize};

use crate::plan::GeneratedPlan;
use crate::{CarePlanError, Result};

/// One reviewable line of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReviewItemRepr")]
pub struct ReviewItem {
    pub text: String,
    pub approved: bool,
}

impl ReviewItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            approved: true,
        }
    }
}

/// Items may arrive as bare strings (approved) or as full records.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReviewItemRepr {
    Text(String),
    Item {
        text: String,
        #[serde(default = "default_true")]
        approved: bool,
    },
}

fn default_true() -> bool {
    true
}

impl From<ReviewItemRepr> for ReviewItem {
    fn from(repr: ReviewItemRepr) -> Self {
        match repr {
            ReviewItemRepr::Text(text) => Self::new(text),
            ReviewItemRepr::Item { text, approved } => Self { text, approved },
        }
    }
}

/// An ordered list of reviewable items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewList {
    items: Vec<ReviewItem>,
}

impl ReviewList {
    /// Start a review with every item approved
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: texts.into_iter().map(ReviewItem::new).collect(),
        }
    }

    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip an item's approval, returning the new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let item = self.get_mut(index)?;
        item.approved = !item.approved;
        Ok(item.approved)
    }

    pub fn set_approved(&mut self, index: usize, approved: bool) -> Result<()> {
        self.get_mut(index)?.approved = approved;
        Ok(())
    }

    /// Replace an item's text, keeping its approval.
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.get_mut(index)?.text = text.into();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<ReviewItem> {
        if index >= self.items.len() {
            return Err(out_of_range(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    /// Append a new, approved item.
    pub fn push(&mut self, text: impl Into<String>) {
        self.items.push(ReviewItem::new(text));
    }

    /// Approved item texts in their original order
    pub fn approved(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.approved)
            .map(|item| item.text.clone())
            .collect()
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut ReviewItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))
    }
}

fn out_of_range(index: usize, len: usize) -> CarePlanError {
    CarePlanError::NotFound(format!("no item at index {} (list has {})", index, len))
}

/// Mutable review state for both lists of a generated plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[serde(default)]
    pub plan: ReviewList,
    #[serde(default)]
    pub healthy_solutions: ReviewList,
}

impl ReviewDraft {
    /// Freeze the draft, keeping only approved items.
    pub fn approve(&self) -> ApprovedPlan {
        ApprovedPlan {
            plan: self.plan.approved(),
            healthy_solutions: self.healthy_solutions.approved(),
        }
    }
}

impl From<GeneratedPlan> for ReviewDraft {
    fn from(generated: GeneratedPlan) -> Self {
        Self {
            plan: ReviewList::from_texts(generated.plan),
            healthy_solutions: ReviewList::from_texts(generated.healthy_solutions),
        }
    }
}

/// A plan that has passed review. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedPlan {
    plan: Vec<String>,
    healthy_solutions: Vec<String>,
}

impl ApprovedPlan {
    pub fn plan(&self) -> &[String] {
        &self.plan
    }

    pub fn healthy_solutions(&self) -> &[String] {
        &self.healthy_solutions
    }
}
