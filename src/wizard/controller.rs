//! Wizard controller
//!
//! Orchestrates the five step creation flow: step gating against the
//! validation engine, debounced draft autosave, and terminal submission to
//! the event service. The controller owns the draft outright and knows
//! nothing about how it is rendered.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::Settings;
use crate::models::draft::{DraftSnapshot, EventDraft};
use crate::models::event::Event;
use crate::services::EventService;
use crate::utils::errors::{Result, ZenFlowError};
use crate::utils::logging::{log_autosave, log_wizard_transition};

use super::registry::SectionRegistry;
use super::storage::DraftStore;
use super::validation::validate_step;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 5;

/// Steps that must re-validate on submit, in jump-back priority order
const GATED_STEPS: [u8; 2] = [1, 3];

pub fn step_name(step: u8) -> &'static str {
    match step {
        1 => "Basic Details",
        2 => "Configure Sections",
        3 => "Section Details",
        4 => "AI Enhancement",
        5 => "Review & Create",
        _ => "Unknown",
    }
}

/// Result of an advance attempt
#[derive(Debug)]
pub enum StepOutcome {
    /// Transitioned (or stayed at the last step); carries the current step
    Advanced(u8),
    /// Validation failed; the wizard stays put and surfaces the errors
    Rejected(BTreeMap<String, String>),
}

pub struct WizardController<S: DraftStore> {
    author: String,
    step: u8,
    draft: EventDraft,
    registry: SectionRegistry,
    store: S,
    debounce: Duration,
    autosave: Option<JoinHandle<()>>,
}

impl<S: DraftStore> WizardController<S> {
    /// Build a controller with the autosave debounce taken from settings
    pub async fn from_settings(author: &str, store: S, settings: &Settings) -> Result<Self> {
        let debounce = Duration::from_millis(settings.drafts.autosave_debounce_ms);
        Self::hydrate(author, store, debounce).await
    }

    /// Build a controller for an author, restoring any autosaved snapshot.
    /// Malformed snapshots are discarded by the store and the wizard starts
    /// fresh.
    pub async fn hydrate(author: &str, store: S, debounce: Duration) -> Result<Self> {
        let snapshot = store.load(author).await?;

        let (step, draft) = match snapshot {
            Some(snapshot) => (
                snapshot.current_step.clamp(FIRST_STEP, LAST_STEP),
                snapshot.draft,
            ),
            None => (FIRST_STEP, EventDraft::empty()),
        };

        Ok(Self {
            author: author.to_string(),
            step,
            draft,
            registry: SectionRegistry::standard(),
            store,
            debounce,
            autosave: None,
        })
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Apply a mutation to the draft and schedule a debounced autosave
    pub fn update(&mut self, mutate: impl FnOnce(&mut EventDraft)) {
        mutate(&mut self.draft);
        self.schedule_autosave();
    }

    /// Validate the current step without transitioning
    pub fn validate_current(&self) -> BTreeMap<String, String> {
        validate_step(self.step, &self.draft, &self.registry)
    }

    /// Attempt to move to the next step. Validation failure keeps the wizard
    /// on the current step; success past the last step is a no-op.
    pub fn advance(&mut self) -> StepOutcome {
        let errors = self.validate_current();
        if !errors.is_empty() {
            return StepOutcome::Rejected(errors);
        }

        if self.step < LAST_STEP {
            let from = self.step;
            self.step += 1;
            log_wizard_transition(&self.author, from, self.step);
            self.schedule_autosave();
        }

        StepOutcome::Advanced(self.step)
    }

    /// Move back one step. Always permitted, never validates.
    pub fn retreat(&mut self) -> u8 {
        if self.step > FIRST_STEP {
            let from = self.step;
            self.step -= 1;
            log_wizard_transition(&self.author, from, self.step);
            self.schedule_autosave();
        }
        self.step
    }

    /// Re-validate the gated steps before submission. Fields invalidated
    /// through back-navigation send the wizard back to the first offending
    /// step instead of failing silently.
    pub fn validate_submission(&mut self) -> Result<()> {
        for step in GATED_STEPS {
            let errors = validate_step(step, &self.draft, &self.registry);
            if !errors.is_empty() {
                let from = self.step;
                self.step = step;
                warn!(
                    author = %self.author,
                    step = step_name(step),
                    "Submission blocked, returning to invalid step"
                );
                log_wizard_transition(&self.author, from, self.step);
                return Err(ZenFlowError::Validation { errors });
            }
        }
        Ok(())
    }

    /// Submit the draft for creation.
    ///
    /// On success the autosaved snapshot is cleared and no further autosave
    /// fires for this draft.
    pub async fn submit(&mut self, events: &EventService) -> Result<Event> {
        self.validate_submission()?;

        let event = events.create_from_draft(&self.draft).await?;

        self.cancel_autosave();
        if let Err(e) = self.store.clear(&self.author).await {
            warn!(author = %self.author, error = %e, "Failed to clear submitted draft");
        }

        Ok(event)
    }

    fn schedule_autosave(&mut self) {
        self.cancel_autosave();

        let snapshot = DraftSnapshot::new(&self.author, self.step, self.draft.clone());
        let store = self.store.clone();
        let debounce = self.debounce;

        self.autosave = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match store.save(&snapshot).await {
                Ok(()) => log_autosave(&snapshot.author, true, None),
                Err(e) => log_autosave(&snapshot.author, false, Some(&e.to_string())),
            }
        }));
    }

    fn cancel_autosave(&mut self) {
        if let Some(handle) = self.autosave.take() {
            handle.abort();
        }
    }
}

impl<S: DraftStore> Drop for WizardController<S> {
    fn drop(&mut self) {
        self.cancel_autosave();
    }
}
