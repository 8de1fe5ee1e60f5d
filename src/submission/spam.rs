use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::draft::SubmissionDraft;

/// Submissions arriving sooner than this after render are treated as automated.
pub const DEFAULT_MIN_SUBMIT_INTERVAL_MS: i64 = 3000;

static REPEATED_EXCLAMATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!{2,}").unwrap());

static SPAM_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:click here|buy now|free money|get rich|act now|limited time offer|risk-free|casino|viagra|crypto investment)\b|100% free)",
    )
    .unwrap()
});

static CAPS_PHRASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}(?:\s+[A-Z]{2,})+\b").unwrap());

static URGENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:free|money|cash|rich|buy|cheap|discount|offer|winner|prize|urgent|now|limited)\b|[$€])",
    )
    .unwrap()
});

static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\bhttps?://|\bwww\.)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpamReason {
    HoneypotFilled,
    TooFast,
    ContentFlagged,
}

impl SpamReason {
    pub fn code(&self) -> &'static str {
        match self {
            SpamReason::HoneypotFilled => "honeypot-filled",
            SpamReason::TooFast => "too-fast",
            SpamReason::ContentFlagged => "content-flagged",
        }
    }
}

impl std::fmt::Display for SpamReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamVerdict {
    Accepted,
    Rejected(SpamReason),
}

impl SpamVerdict {
    pub fn is_spam(&self) -> bool {
        matches!(self, SpamVerdict::Rejected(_))
    }

    pub fn reason(&self) -> Option<SpamReason> {
        match self {
            SpamVerdict::Accepted => None,
            SpamVerdict::Rejected(reason) => Some(*reason),
        }
    }
}

/// Run the heuristics in order: honeypots, timing, then content.
/// The first rule that fires decides the verdict.
pub fn check(draft: &SubmissionDraft, now_ms: i64, min_interval_ms: i64) -> SpamVerdict {
    if draft.honeypots.any_filled() {
        return SpamVerdict::Rejected(SpamReason::HoneypotFilled);
    }

    if is_too_fast(draft.rendered_at, now_ms, min_interval_ms) {
        return SpamVerdict::Rejected(SpamReason::TooFast);
    }

    if is_flagged_content(&draft.message)
        || is_flagged_content(&draft.name)
        || BARE_URL_RE.is_match(&draft.name)
    {
        return SpamVerdict::Rejected(SpamReason::ContentFlagged);
    }

    SpamVerdict::Accepted
}

// A missing timestamp can't prove a human-plausible delay.
fn is_too_fast(rendered_at: Option<i64>, now_ms: i64, min_interval_ms: i64) -> bool {
    match rendered_at {
        Some(ts) => now_ms.saturating_sub(ts) < min_interval_ms,
        None => true,
    }
}

fn is_flagged_content(text: &str) -> bool {
    REPEATED_EXCLAMATION_RE.is_match(text)
        || SPAM_PHRASE_RE.is_match(text)
        || (CAPS_PHRASE_RE.is_match(text) && URGENCY_RE.is_match(text))
}
