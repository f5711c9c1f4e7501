use std::{
    any::Any,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use futures::FutureExt;
use shared::{
    domain::FormField,
    protocol::{ContactForm, SubmissionReceipt},
};
use thiserror::Error;

use super::service::SubmissionService;
use crate::{
    scheduler::{Scheduler, TaskHandle},
    validation::{validate_form, ValidationReport},
    view::{FormStatus, PageView},
};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent.";
pub const FAILURE_MESSAGE: &str = "Sorry, your message could not be sent. Please try again.";
pub const INVALID_MESSAGE: &str = "Please correct the highlighted fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission service failed: {0}")]
    Service(String),
    #[error("submission service panicked: {0}")]
    Panicked(String),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Invalid(ValidationReport),
    Succeeded(SubmissionReceipt),
    Failed(SubmissionError),
    /// Another attempt was already in flight; nothing was done.
    Rejected,
}

struct PipelineState {
    phase: PipelinePhase,
    status_clear: Option<TaskHandle>,
}

pub struct SubmissionPipeline {
    service: Arc<dyn SubmissionService>,
    view: Arc<dyn PageView>,
    scheduler: Arc<dyn Scheduler>,
    success_message_ttl: Duration,
    state: Mutex<PipelineState>,
}

impl SubmissionPipeline {
    pub fn new(
        service: Arc<dyn SubmissionService>,
        view: Arc<dyn PageView>,
        scheduler: Arc<dyn Scheduler>,
        success_message_ttl: Duration,
    ) -> Self {
        Self {
            service,
            view,
            scheduler,
            success_message_ttl,
            state: Mutex::new(PipelineState {
                phase: PipelinePhase::Idle,
                status_clear: None,
            }),
        }
    }

    pub fn phase(&self) -> PipelinePhase {
        self.lock_state().phase
    }

    fn lock_state(&self) -> MutexGuard<'_, PipelineState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn submit(&self, form: ContactForm) -> SubmitOutcome {
        {
            let mut state = self.lock_state();
            if state.phase != PipelinePhase::Idle {
                tracing::warn!(phase = ?state.phase, "submission already in progress; ignoring");
                return SubmitOutcome::Rejected;
            }
            state.phase = PipelinePhase::Validating;
            if let Some(pending) = state.status_clear.take() {
                pending.cancel();
            }
        }

        self.view.show_form_status(None);
        for field in FormField::ALL {
            self.view.show_field_error(field, None);
        }

        let report = validate_form(&form);
        if !report.is_valid() {
            for error in report.errors() {
                self.view.show_field_error(error.field, error.message.as_deref());
            }
            self.view
                .show_form_status(Some(&FormStatus::Error(INVALID_MESSAGE.to_string())));
            self.lock_state().phase = PipelinePhase::Idle;
            tracing::info!(errors = report.errors().count(), "contact form invalid");
            return SubmitOutcome::Invalid(report);
        }

        let _busy = BusyGuard::engage(self);
        let submission = form.to_submission();
        tracing::info!(subject = %submission.subject, "submitting contact form");

        let result = AssertUnwindSafe(self.service.submit(&submission))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(receipt)) => {
                self.view
                    .show_form_status(Some(&FormStatus::Success(SUCCESS_MESSAGE.to_string())));
                self.view.clear_form();
                self.schedule_status_clear();
                tracing::info!(reference = %receipt.reference, "contact form submitted");
                SubmitOutcome::Succeeded(receipt)
            }
            Ok(Err(err)) => {
                tracing::warn!("contact form submission failed: {err:#}");
                self.view
                    .show_form_status(Some(&FormStatus::Error(FAILURE_MESSAGE.to_string())));
                SubmitOutcome::Failed(SubmissionError::Service(format!("{err:#}")))
            }
            Err(panic) => {
                let reason = panic_reason(panic.as_ref());
                tracing::error!(reason = %reason, "submission service panicked");
                self.view
                    .show_form_status(Some(&FormStatus::Error(FAILURE_MESSAGE.to_string())));
                SubmitOutcome::Failed(SubmissionError::Panicked(reason))
            }
        }
    }

    fn schedule_status_clear(&self) {
        let view = self.view.clone();
        let handle = self.scheduler.schedule(
            self.success_message_ttl,
            Box::new(move || view.show_form_status(None)),
        );
        self.lock_state().status_clear = Some(handle);
    }
}

/// Marks the trigger busy for the lifetime of the guard; dropping it always
/// returns the pipeline to idle.
struct BusyGuard<'a> {
    pipeline: &'a SubmissionPipeline,
}

impl<'a> BusyGuard<'a> {
    fn engage(pipeline: &'a SubmissionPipeline) -> Self {
        pipeline.lock_state().phase = PipelinePhase::Submitting;
        pipeline.view.set_submit_busy(true);
        Self { pipeline }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.pipeline.lock_state().phase = PipelinePhase::Idle;
        self.pipeline.view.set_submit_busy(false);
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
