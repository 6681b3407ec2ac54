//! Remedy value objects and the per-request result union

use serde::{Deserialize, Serialize};

/// A named, step-by-step home remedy (Value Object)
///
/// `remedy_name` is never empty. Caution notes travel as ordinary entries
/// of `steps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemedyInstruction {
    remedy_name: String,
    steps: Option<Vec<String>>,
}

impl RemedyInstruction {
    /// Create a remedy, returning `None` if the name is blank
    pub fn try_new(remedy_name: impl Into<String>, steps: Option<Vec<String>>) -> Option<Self> {
        let remedy_name = remedy_name.into();
        if remedy_name.trim().is_empty() {
            None
        } else {
            Some(Self { remedy_name, steps })
        }
    }

    pub fn remedy_name(&self) -> &str {
        &self.remedy_name
    }

    pub fn steps(&self) -> Option<&[String]> {
        self.steps.as_deref()
    }
}

/// Grocery suggestions returned by the shopping-list fallback
///
/// Kept as the provider's comma separated text; [`ShoppingList::items`]
/// splits it for consumers that need discrete entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    raw: String,
}

impl ShoppingList {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn items(&self) -> Vec<&str> {
        self.raw
            .split(',')
            .map(|item| item.trim().trim_matches('"').trim())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Why a request produced no usable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The provider could not be reached or rejected the call
    Provider,
    /// The provider answered but the output could not be interpreted
    Parse,
}

/// Outcome of a single remedy request
///
/// Exactly one variant is produced per request; callers match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemedyResult {
    Remedy(RemedyInstruction),
    ShoppingList(ShoppingList),
    Failure { kind: FailureKind, reason: String },
}

impl RemedyResult {
    pub fn provider_failure(provider_name: &str) -> Self {
        RemedyResult::Failure {
            kind: FailureKind::Provider,
            reason: format!("{} call failed", provider_name),
        }
    }

    pub fn parse_failure(reason: impl Into<String>) -> Self {
        RemedyResult::Failure {
            kind: FailureKind::Parse,
            reason: reason.into(),
        }
    }
}
