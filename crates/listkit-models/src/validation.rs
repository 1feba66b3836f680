//! Validation results, readiness scores and preflight checks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Score at or above which a listing reads as "good" in the editor.
pub const SCORE_GOOD_THRESHOLD: u8 = 80;

/// Score at or above which a listing reads as "caution"; below is "poor".
pub const SCORE_CAUTION_THRESHOLD: u8 = 60;

/// Outcome of validating a resolved view against a channel's rules.
///
/// Invariant: `is_ready` is true exactly when `errors` is empty, independent
/// of warnings or score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    /// Whether export is permitted
    pub is_ready: bool,

    /// Readiness score, 0-100
    pub score: u8,

    /// Blocking problems; export is refused while any exist
    pub errors: Vec<String>,

    /// Non-blocking advisories
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result from collected messages, enforcing the readiness
    /// invariant.
    pub fn new(score: u8, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_ready: errors.is_empty(),
            score,
            errors,
            warnings,
        }
    }

    /// A passing result with a perfect score.
    pub fn ready() -> Self {
        Self::new(100, Vec::new(), Vec::new())
    }
}

/// Status of a single preflight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }
}

/// A named, human-readable diagnostic surfaced before committing to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PreflightCheck {
    /// Short name (e.g. "Title")
    pub name: String,

    /// Check outcome
    pub status: CheckStatus,

    /// What the check verifies
    pub description: String,

    /// Optional detail about why the check did not pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PreflightCheck {
    pub fn pass(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            description: description.into(),
            detail: None,
        }
    }

    pub fn warning(
        name: impl Into<String>,
        description: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning,
            description: description.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn fail(
        name: impl Into<String>,
        description: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Fail,
            description: description.into(),
            detail: Some(detail.into()),
        }
    }
}
