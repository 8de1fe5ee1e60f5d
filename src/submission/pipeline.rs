use std::net::IpAddr;

use crate::error::AppError;
use crate::messages;
use crate::state::SharedState;
use crate::text;

use super::draft::SubmissionDraft;
use super::form::ContactForm;

pub struct PipelineResult {
    pub relay_message: Option<String>,
}

/// Parse, validate, filter and relay one posted contact form. The caller has
/// already charged the request to the client's rate limit.
pub async fn run(
    state: &SharedState,
    client_ip: IpAddr,
    raw_data: serde_json::Value,
    now_ms: i64,
) -> Result<PipelineResult, AppError> {
    let config = &state.config;

    let (draft, form_id) = SubmissionDraft::from_value(&raw_data).map_err(AppError::BadRequest)?;

    let _guard = match form_id {
        Some(id) => Some(
            state
                .in_flight
                .claim(id)
                .ok_or_else(|| AppError::Conflict(messages::ALREADY_SUBMITTING.to_string()))?,
        ),
        None => None,
    };

    let mut form = ContactForm::from_draft(draft).with_min_interval(config.min_submit_interval_ms);
    let receipt = form.submit(state.transport.as_ref(), now_ms).await?;

    tracing::info!(ip = %client_ip, "Contact message relayed");
    tracing::debug!(
        preview = %text::truncate(&form.draft().message, 40),
        "Relayed message preview"
    );

    Ok(PipelineResult {
        relay_message: receipt.message,
    })
}
