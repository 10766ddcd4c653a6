//! Care plan module for careplan
//!
//! Intake records, plan generation, the review step, and document export.

pub mod document;
mod generator;
mod models;
pub mod review;

pub use document::{CarePlanDocument, DocumentFormat};
pub use generator::generate_plan;
pub use models::{GeneratedPlan, PatientInput};
pub use review::{ApprovedPlan, ReviewDraft, ReviewItem, ReviewList};
