pub mod draft;
pub mod form;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod spam;
pub mod validation;

pub use draft::{Honeypots, Purpose, SubmissionDraft};
pub use form::{ContactForm, FormStatus, SubmitError};
pub use spam::{SpamReason, SpamVerdict};
pub use validation::{Field, ValidationResult};
