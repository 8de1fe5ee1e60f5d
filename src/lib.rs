pub mod config;
pub mod error;
pub mod state;
pub mod messages;
pub mod text;
pub mod transport;
pub mod submission;
pub mod inflight;
pub mod rate_limit;
pub mod routes;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::inflight::InFlightForms;
use crate::rate_limit::SubmissionRateLimiter;
use crate::state::{AppState, SharedState};
use crate::transport::{RelayTransport, Transport};

/// Build the service with the reqwest-backed relay transport.
pub fn build_app(config: Config) -> Result<(Router, SharedState), String> {
    let transport = RelayTransport::new(&config.relay)?;
    tracing::info!("Relaying contact messages to {}", config.relay.url);
    Ok(build_app_with_transport(config, Arc::new(transport)))
}

pub fn build_app_with_transport(
    config: Config,
    transport: Arc<dyn Transport>,
) -> (Router, SharedState) {
    let cors = cors_layer(&config.cors_origins);
    let body_limit = DefaultBodyLimit::max(config.max_body_size);

    let state: SharedState = Arc::new(AppState {
        config,
        transport,
        submission_limiter: SubmissionRateLimiter::new(),
        in_flight: InFlightForms::new(),
    });

    let contact = routes::contact_routes().layer(ServiceBuilder::new().layer(cors).layer(body_limit));

    let app = Router::new()
        .merge(contact)
        .merge(views::view_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state.clone());

    (app, state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn health() -> &'static str {
    "ok"
}
