use askama::Template;
use axum::extract::Query;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::submission::validation::{
    MAX_MESSAGE_LEN, MAX_NAME_LEN, MIN_MESSAGE_LEN, MIN_NAME_LEN,
};
use crate::submission::Purpose;

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    heading: String,
    action: String,
    purpose: String,
    timestamp: i64,
    form_id: String,
    min_name_len: usize,
    max_name_len: usize,
    min_message_len: usize,
    max_message_len: usize,
}

#[derive(Deserialize)]
pub struct ContactQuery {
    pub purpose: Option<String>,
}

/// Render a fresh form instance. The render time and form id travel back
/// with the submission as hidden fields.
pub async fn contact_page(Query(q): Query<ContactQuery>) -> Result<Response, AppError> {
    let purpose = q.purpose.as_deref().and_then(Purpose::parse);

    let template = ContactTemplate {
        heading: purpose
            .map(|p| p.heading())
            .unwrap_or("Send me a message")
            .to_string(),
        action: "/v1/contact".to_string(),
        purpose: purpose.map(|p| p.as_str()).unwrap_or_default().to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        form_id: Uuid::now_v7().to_string(),
        min_name_len: MIN_NAME_LEN,
        max_name_len: MAX_NAME_LEN,
        min_message_len: MIN_MESSAGE_LEN,
        max_message_len: MAX_MESSAGE_LEN,
    };

    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render contact form: {e}")))?;
    Ok(Html(html).into_response())
}
