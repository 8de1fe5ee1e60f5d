//! User-facing texts. Detection details never leak into these.

pub const SUBMITTED: &str = "Thank you! Your message has been sent.";
pub const VALIDATION: &str = "Please check your input and try again.";
pub const SPAM: &str = "Your message looks like spam and was not sent.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const NETWORK: &str = "Network error. Please check your connection.";
pub const ALREADY_SUBMITTING: &str = "This form is already being submitted.";
pub const ALREADY_SUBMITTED: &str = "This message has already been sent.";
