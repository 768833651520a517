//! Model types for checklists: grades, months, tasks and progress.

use crate::error::Error;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// High school grade level. Selects which checklist a student sees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum GradeLevel {
    /// Freshman year (default for new profiles).
    #[default]
    #[serde(rename = "9th")]
    Ninth,
    /// Sophomore year.
    #[serde(rename = "10th")]
    Tenth,
    /// Junior year.
    #[serde(rename = "11th")]
    Eleventh,
    /// Senior year.
    #[serde(rename = "12th")]
    Twelfth,
}

impl GradeLevel {
    /// All grade levels in ascending order.
    pub const ALL: [Self; 4] = [Self::Ninth, Self::Tenth, Self::Eleventh, Self::Twelfth];

    /// Get the string representation used in storage keys and profiles.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ninth => "9th",
            Self::Tenth => "10th",
            Self::Eleventh => "11th",
            Self::Twelfth => "12th",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownGrade(s.to_string()))
    }
}

/// Calendar month, named with fixed English month names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// Months in calendar order, indexed by zero-based ordinal.
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Months in school-year order, August through July.
    pub const SCHOOL_YEAR: [Self; 12] = [
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
    ];

    /// Map a zero-based month ordinal (0 = January) to a month.
    ///
    /// Returns `None` for ordinals outside 0-11.
    #[must_use]
    pub fn from_ordinal0(ordinal: u32) -> Option<Self> {
        usize::try_from(ordinal).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// The month a date falls in.
    #[must_use]
    pub fn from_date(date: &impl Datelike) -> Self {
        // month0() is always 0-11.
        Self::from_ordinal0(date.month0()).unwrap_or(Self::January)
    }

    /// Position of this month in the school year (August = 0).
    #[must_use]
    pub fn school_year_index(self) -> usize {
        Self::SCHOOL_YEAR.iter().position(|m| *m == self).unwrap_or_default()
    }

    /// Get the English month name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|month| month.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownMonth(s.to_string()))
    }
}

/// A checklist task.
///
/// `id` is unique within one (grade, month) list only. `done` is the only
/// field that changes after a list has been seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, stable within its list.
    pub id: String,
    /// Human-readable description.
    pub text: String,
    /// Completion flag.
    pub done: bool,
}

impl Task {
    /// Create a task that is not yet done.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), done: false }
    }
}

/// Completion counts for a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Number of tasks marked done.
    pub completed: usize,
    /// Number of tasks in the list.
    pub total: usize,
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`. An empty list counts as 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Completed percentage rounded to the nearest whole number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(self) -> u8 {
        (self.fraction() * 100.0).round() as u8
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} tasks completed", self.completed, self.total)
    }
}
