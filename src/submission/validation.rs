use std::collections::BTreeMap;

use serde::Serialize;

use crate::text;

use super::draft::SubmissionDraft;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
pub const MIN_MESSAGE_LEN: usize = 10;
pub const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];
}

/// Field name to error message. A field absent from the map is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn set(&mut self, field: Field, error: Option<String>) {
        match error {
            Some(msg) => self.errors.insert(field, msg),
            None => self.errors.remove(&field),
        };
    }
}

pub fn validate(draft: &SubmissionDraft) -> ValidationResult {
    let errors = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(draft, field).map(|msg| (field, msg)))
        .collect();
    ValidationResult { errors }
}

/// Check a single field, as done when an input loses focus.
pub fn validate_field(draft: &SubmissionDraft, field: Field) -> Option<String> {
    match field {
        Field::Name => check_length("Name", &draft.name, MIN_NAME_LEN, MAX_NAME_LEN),
        Field::Email => {
            if draft.email.trim().is_empty() {
                Some("Email is required".to_string())
            } else if !text::is_valid_email(&draft.email) {
                Some("Please enter a valid email address".to_string())
            } else {
                None
            }
        }
        Field::Message => check_length("Message", &draft.message, MIN_MESSAGE_LEN, MAX_MESSAGE_LEN),
    }
}

fn check_length(label: &str, value: &str, min: usize, max: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{label} is required"));
    }
    // Padding does not count toward the minimum but does toward the maximum.
    if trimmed.chars().count() < min {
        Some(format!("{label} must be at least {min} characters"))
    } else if value.chars().count() > max {
        Some(format!("{label} must be at most {max} characters"))
    } else {
        None
    }
}
