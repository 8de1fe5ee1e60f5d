use std::sync::Arc;

use crate::config::Config;
use crate::inflight::InFlightForms;
use crate::rate_limit::SubmissionRateLimiter;
use crate::transport::Transport;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub transport: Arc<dyn Transport>,
    pub submission_limiter: SubmissionRateLimiter,
    pub in_flight: InFlightForms,
}
