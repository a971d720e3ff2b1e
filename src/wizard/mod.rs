//! Event creation wizard
//!
//! This module implements the five step creation flow: the section registry,
//! the step validation engine, the wizard controller, and draft persistence.

pub mod controller;
pub mod registry;
pub mod storage;
pub mod validation;

pub use controller::{step_name, StepOutcome, WizardController, FIRST_STEP, LAST_STEP};
pub use registry::{RequirementKind, SectionRegistry, SectionRequirement};
pub use storage::{DraftStore, MemoryDraftStore, RedisDraftStorage};
pub use validation::validate_step;
