//! Checklist scopes and their storage keys.

use super::models::{GradeLevel, Month};
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every persisted scope record.
pub const SCOPE_KEY_PREFIX: &str = "tasks_";

static SCOPE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^tasks_(9th|10th|11th|12th)_([A-Za-z]+)$").expect("scope key regex is valid")
});

/// A (grade level, month) pair identifying one checklist instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    /// Grade level.
    pub grade: GradeLevel,
    /// Calendar month.
    pub month: Month,
}

impl Scope {
    /// Create a scope.
    #[must_use]
    pub const fn new(grade: GradeLevel, month: Month) -> Self {
        Self { grade, month }
    }

    /// The key under which this scope's task list is stored, e.g. `tasks_9th_August`.
    #[must_use]
    pub fn storage_key(self) -> String {
        format!("{SCOPE_KEY_PREFIX}{}_{}", self.grade, self.month)
    }

    /// Parse a storage key back into a scope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScopeKey`] if the key does not have the
    /// `tasks_<grade>_<month>` shape or names an unknown month.
    pub fn from_storage_key(key: &str) -> Result<Self> {
        let caps =
            SCOPE_KEY_RE.captures(key).ok_or_else(|| Error::InvalidScopeKey(key.to_string()))?;
        let grade = caps[1].parse::<GradeLevel>()?;
        // Month names in keys are written by storage_key, so case must match exactly.
        let month = Month::ALL
            .into_iter()
            .find(|m| m.as_str() == &caps[2])
            .ok_or_else(|| Error::InvalidScopeKey(key.to_string()))?;
        Ok(Self { grade, month })
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grade, {}", self.grade, self.month)
    }
}
