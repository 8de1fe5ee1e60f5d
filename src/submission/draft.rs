use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Names of the hidden inputs humans never fill.
pub const HONEYPOT_FIELDS: [&str; 2] = ["website", "phone2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Project,
    Hello,
    Collaboration,
}

impl Purpose {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "project" => Some(Purpose::Project),
            "hello" => Some(Purpose::Hello),
            "collaboration" => Some(Purpose::Collaboration),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Project => "project",
            Purpose::Hello => "hello",
            Purpose::Collaboration => "collaboration",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Purpose::Project => "Tell me about your project",
            Purpose::Hello => "Say hello",
            Purpose::Collaboration => "Let's explore collaboration",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Honeypots {
    pub website: String,
    pub phone2: String,
}

impl Honeypots {
    pub fn any_filled(&self) -> bool {
        !self.website.trim().is_empty() || !self.phone2.trim().is_empty()
    }
}

/// One form interaction's worth of input plus the hidden anti-spam signals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    pub purpose: Option<Purpose>,
    pub honeypots: Honeypots,
    /// Epoch milliseconds at which the form was rendered.
    pub rendered_at: Option<i64>,
}

impl SubmissionDraft {
    pub fn new(rendered_at: i64) -> Self {
        Self {
            rendered_at: Some(rendered_at),
            ..Default::default()
        }
    }

    /// Build a draft from a parsed request body. Returns the draft and the
    /// form instance id, if the client sent a usable one.
    pub fn from_value(raw: &Value) -> Result<(Self, Option<Uuid>), String> {
        if !raw.is_object() {
            return Err("Expected an object of form fields".to_string());
        }

        let draft = SubmissionDraft {
            name: text_field(raw, "name"),
            email: text_field(raw, "email"),
            message: text_field(raw, "message"),
            purpose: raw
                .get("purpose")
                .and_then(|v| v.as_str())
                .and_then(Purpose::parse),
            honeypots: Honeypots {
                website: text_field(raw, HONEYPOT_FIELDS[0]),
                phone2: text_field(raw, HONEYPOT_FIELDS[1]),
            },
            rendered_at: raw.get("timestamp").and_then(millis),
        };

        let form_id = raw
            .get("form_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s.trim()).ok());

        Ok((draft, form_id))
    }
}

fn text_field(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}
