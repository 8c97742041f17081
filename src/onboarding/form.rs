//! OnboardingForm — the registration record, the current step, and their
//! write-through persistence.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::location::{PINCODE_LEN, resolve_location};
use super::model::{FileField, FormRecord, TextField};
use super::step::Step;
use super::visibility::{self, VisibleField};
use crate::error::FlowError;
use crate::store::{PersistenceStore, keys};

/// Presentation hook told to jump back to the top when the page changes.
pub trait Viewport: Send + Sync {
    fn scroll_to_top(&self, step: Step);
}

/// Viewport that does nothing, for headless use.
#[derive(Debug, Default)]
pub struct NoViewport;

impl Viewport for NoViewport {
    fn scroll_to_top(&self, _step: Step) {}
}

/// Holds the in-progress registration.
pub struct OnboardingForm {
    store: Arc<dyn PersistenceStore>,
    viewport: Arc<dyn Viewport>,
    record: FormRecord,
    step: Step,
    persist_step: bool,
    // Reveal toggles for the step-one password inputs. Never persisted.
    show_password: bool,
    show_confirm_password: bool,
}

impl OnboardingForm {
    /// Restore the record (and, when enabled, the step) from the store.
    ///
    /// An unreadable stored record is logged and replaced by the defaults.
    pub async fn restore(store: Arc<dyn PersistenceStore>, persist_step: bool) -> Self {
        Self::restore_with(store, persist_step, true).await
    }

    /// Like [`restore`](Self::restore), but starts at step one without
    /// reading the saved step unless `resume_step` is set. Nothing is
    /// written back.
    pub(crate) async fn restore_with(
        store: Arc<dyn PersistenceStore>,
        persist_step: bool,
        resume_step: bool,
    ) -> Self {
        let record = match store.get(keys::FORM_DATA).await {
            Ok(Some(raw)) => match serde_json::from_str::<FormRecord>(&raw) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to parse saved form data: {}", e);
                    FormRecord::default()
                }
            },
            Ok(None) => FormRecord::default(),
            Err(e) => {
                warn!("Failed to read saved form data: {}", e);
                FormRecord::default()
            }
        };

        let step = if persist_step && resume_step {
            restore_step(store.as_ref()).await
        } else {
            Step::FIRST
        };

        Self {
            store,
            viewport: Arc::new(NoViewport),
            record,
            step,
            persist_step,
            show_password: false,
            show_confirm_password: false,
        }
    }

    /// Attach the presentation viewport.
    pub fn with_viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Replace a text field's value.
    ///
    /// A complete pincode with a known prefix also fills in city and state;
    /// otherwise those fields keep whatever they held.
    pub async fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        debug!(field = %field, "Field updated");

        if field == TextField::Pincode && value.chars().count() == PINCODE_LEN {
            if let Some(location) = resolve_location(&value) {
                debug!(city = location.city, state = location.state, "Pincode resolved");
                self.record.city = location.city.to_string();
                self.record.state = location.state.to_string();
            }
        }
        *self.record.text_mut(field) = value;

        self.persist_record().await;
    }

    pub fn toggle_password_visibility(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    pub fn toggle_confirm_password_visibility(&mut self) -> bool {
        self.show_confirm_password = !self.show_confirm_password;
        self.show_confirm_password
    }

    /// Whether a field renders masked. The account number has no reveal toggle.
    pub fn is_masked(&self, field: TextField) -> bool {
        match field {
            TextField::Password => !self.show_password,
            TextField::ConfirmPassword => !self.show_confirm_password,
            other => other.is_secret(),
        }
    }

    /// A field's value as the page shows it.
    pub fn displayed_value(&self, field: TextField) -> String {
        let value = self.record.text(field);
        if self.is_masked(field) {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }

    pub async fn set_partnership_agreed(&mut self, agreed: bool) {
        self.record.partnership_agreed = agreed;
        self.persist_record().await;
    }

    /// Attach a file. Only its display name is kept.
    pub async fn set_file(&mut self, field: FileField, file_name: impl Into<String>) {
        *self.record.file_mut(field) = file_name.into();
        debug!(field = %field, "File attached");
        self.persist_record().await;
    }

    pub async fn clear_file(&mut self, field: FileField) {
        self.record.file_mut(field).clear();
        debug!(field = %field, "File removed");
        self.persist_record().await;
    }

    /// Advance one step. Returns whether the step changed.
    pub async fn next_step(&mut self) -> bool {
        self.go_to(self.step.next()).await
    }

    /// Go back one step. Returns whether the step changed.
    pub async fn prev_step(&mut self) -> bool {
        self.go_to(self.step.prev()).await
    }

    /// Return to the first step.
    pub async fn reset_step(&mut self) -> bool {
        self.go_to(Step::FIRST).await
    }

    /// Fields the current step shows.
    pub fn visible_fields(&self) -> Vec<VisibleField> {
        visibility::visible_fields(self.step, &self.record)
    }

    pub fn gst_fields_visible(&self) -> bool {
        visibility::gst_fields_visible(&self.record)
    }

    pub fn fssai_fields_visible(&self) -> bool {
        visibility::fssai_fields_visible(&self.record)
    }

    pub fn can_submit(&self) -> bool {
        self.record.partnership_agreed
    }

    /// Check the final-submit gate without changing anything.
    pub fn check_submit(&self) -> Result<(), FlowError> {
        if !self.step.is_last() {
            return Err(FlowError::NotOnFinalStep {
                current: self.step.get(),
            });
        }
        if !self.can_submit() {
            return Err(FlowError::AgreementRequired);
        }
        Ok(())
    }

    /// Drop the in-memory answers after a completed submission.
    ///
    /// The store keys are cleared by the screen controller.
    pub(crate) fn discard(&mut self) {
        self.record = FormRecord::default();
        self.step = Step::FIRST;
        self.show_password = false;
        self.show_confirm_password = false;
    }

    /// Write the in-memory step to the store, when step persistence is on.
    pub(crate) async fn save_step(&self) {
        if !self.persist_step {
            return;
        }
        if let Err(e) = self.store.set(keys::STEP, &self.step.to_string()).await {
            warn!("Failed to persist onboarding step: {}", e);
        }
    }

    async fn go_to(&mut self, target: Step) -> bool {
        if target == self.step {
            return false;
        }
        info!(from = %self.step, to = %target, "Onboarding step changed");
        self.step = target;
        self.viewport.scroll_to_top(target);
        self.save_step().await;
        true
    }

    async fn persist_record(&self) {
        let json = match serde_json::to_string(&self.record) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize form data: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::FORM_DATA, &json).await {
            warn!("Failed to persist form data: {}", e);
        }
    }
}

async fn restore_step(store: &dyn PersistenceStore) -> Step {
    match store.get(keys::STEP).await {
        Ok(Some(raw)) => match raw.trim().parse::<u8>().ok().and_then(Step::new) {
            Some(step) => step,
            None => {
                warn!(raw = %raw, "Ignoring invalid saved onboarding step");
                Step::FIRST
            }
        },
        Ok(None) => Step::FIRST,
        Err(e) => {
            warn!("Failed to read saved onboarding step: {}", e);
            Step::FIRST
        }
    }
}
