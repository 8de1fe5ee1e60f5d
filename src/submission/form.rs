use crate::messages;
use crate::transport::{RelayPayload, RelayReceipt, Transport, TransportError};

use super::draft::SubmissionDraft;
use super::spam::{self, SpamReason, SpamVerdict};
use super::validation::{self, Field, ValidationResult};

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Idle,
    Validating,
    /// Back to idle with inline field errors.
    Invalid(ValidationResult),
    /// Back to idle with the generic spam message.
    Rejected,
    Submitting,
    Submitted,
    /// Back to idle with a retry-later message.
    Failed(String),
}

#[derive(Debug)]
pub enum SubmitError {
    Invalid(ValidationResult),
    Spam(SpamReason),
    Transport(TransportError),
    AlreadySubmitted,
}

impl SubmitError {
    /// Text safe to show the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Invalid(_) => messages::VALIDATION,
            SubmitError::Spam(_) => messages::SPAM,
            SubmitError::Transport(TransportError::Network(_)) => messages::NETWORK,
            SubmitError::Transport(_) => messages::SERVER_ERROR,
            SubmitError::AlreadySubmitted => messages::ALREADY_SUBMITTED,
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Invalid(errors) => write!(f, "{} invalid field(s)", errors.len()),
            SubmitError::Spam(reason) => write!(f, "Spam rejected: {reason}"),
            SubmitError::Transport(err) => write!(f, "{err}"),
            SubmitError::AlreadySubmitted => write!(f, "Form already submitted"),
        }
    }
}

/// One contact form instance. Owns its draft from render until the message
/// is delivered; `submit` borrows the form mutably, so only one submission
/// per instance can be in flight.
#[derive(Debug)]
pub struct ContactForm {
    draft: SubmissionDraft,
    status: FormStatus,
    errors: ValidationResult,
    min_interval_ms: i64,
}

impl ContactForm {
    pub fn new(rendered_at_ms: i64) -> Self {
        Self::from_draft(SubmissionDraft::new(rendered_at_ms))
    }

    pub fn from_draft(draft: SubmissionDraft) -> Self {
        Self {
            draft,
            status: FormStatus::Idle,
            errors: ValidationResult::default(),
            min_interval_ms: spam::DEFAULT_MIN_SUBMIT_INTERVAL_MS,
        }
    }

    pub fn with_min_interval(mut self, min_interval_ms: i64) -> Self {
        self.min_interval_ms = min_interval_ms;
        self
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SubmissionDraft {
        &mut self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Re-check one field after the visitor leaves it.
    pub fn blur(&mut self, field: Field) -> Option<&str> {
        let error = validation::validate_field(&self.draft, field);
        self.errors.set(field, error);
        self.errors.get(field)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !matches!(self.status, FormStatus::Submitting | FormStatus::Submitted)
            && validation::validate(&self.draft).is_valid()
    }

    pub async fn submit<T>(
        &mut self,
        transport: &T,
        now_ms: i64,
    ) -> Result<RelayReceipt, SubmitError>
    where
        T: Transport + ?Sized,
    {
        if self.status == FormStatus::Submitted {
            return Err(SubmitError::AlreadySubmitted);
        }

        self.status = FormStatus::Validating;
        let result = validation::validate(&self.draft);
        self.errors = result.clone();
        if !result.is_valid() {
            tracing::debug!("Contact form invalid: {:?}", result);
            self.status = FormStatus::Invalid(result.clone());
            return Err(SubmitError::Invalid(result));
        }

        let verdict = spam::check(&self.draft, now_ms, self.min_interval_ms);
        if let SpamVerdict::Rejected(reason) = verdict {
            tracing::info!(reason = %reason, "Contact submission rejected as spam");
            self.status = FormStatus::Rejected;
            return Err(SubmitError::Spam(reason));
        }

        self.status = FormStatus::Submitting;
        let payload = RelayPayload::from_draft(&self.draft);
        match transport.deliver(&payload).await {
            Ok(receipt) => {
                self.status = FormStatus::Submitted;
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("Contact relay failed: {e}");
                let err = SubmitError::Transport(e);
                self.status = FormStatus::Failed(err.user_message().to_string());
                Err(err)
            }
        }
    }
}
