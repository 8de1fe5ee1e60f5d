use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::messages;
use crate::state::SharedState;
use crate::submission::{metadata, parser, pipeline};

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let client_ip = metadata::client_ip(&headers, Some(addr.ip()), &state.config.trusted_proxies);
    tracing::debug!(
        ip = %client_ip,
        user_agent = metadata::user_agent(&headers),
        "Contact submission received"
    );

    // Every request counts, including ones whose body fails to parse.
    state
        .submission_limiter
        .check(
            client_ip,
            state.config.rate_limit,
            state.config.rate_limit_window_secs,
        )
        .map_err(AppError::RateLimited)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let raw_data = if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
        parser::parse_multipart(&headers, body)
            .await
            .map_err(AppError::BadRequest)?
    } else {
        parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?
    };

    let now_ms = chrono::Utc::now().timestamp_millis();
    let result = pipeline::run(&state, client_ip, raw_data, now_ms).await?;

    if let Some(msg) = &result.relay_message {
        tracing::debug!("Relay said: {msg}");
    }

    // Plain HTML form posts get sent on to the thank-you page, if configured.
    if let Some(ref url) = state.config.redirect_url {
        if content_type.is_some_and(|ct| ct.contains("form")) {
            return Ok(Redirect::to(url).into_response());
        }
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "submitted",
            "message": messages::SUBMITTED,
        })),
    )
        .into_response())
}
