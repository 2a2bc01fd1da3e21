//! Budget cadences and the calendar windows they produce.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Enumerates the recurring cadences a budget can reset on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
}

impl PeriodType {
    pub const ALL: [PeriodType; 3] = [PeriodType::Weekly, PeriodType::Biweekly, PeriodType::Monthly];

    /// Fixed window length in days, or `None` for calendar-month periods.
    pub fn span_days(self) -> Option<u64> {
        match self {
            PeriodType::Weekly => Some(7),
            PeriodType::Biweekly => Some(14),
            PeriodType::Monthly => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodType::Weekly => "weekly",
            PeriodType::Biweekly => "biweekly",
            PeriodType::Monthly => "monthly",
        }
    }

    /// Short user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            PeriodType::Weekly => "Semanal",
            PeriodType::Biweekly => "Quincenal",
            PeriodType::Monthly => "Mensual",
        }
    }

    /// Describes when a budget with this cadence starts over.
    pub fn reset_hint(self) -> &'static str {
        match self {
            PeriodType::Weekly => "El presupuesto se reinicia cada 7 días",
            PeriodType::Biweekly => "El presupuesto se reinicia cada 14 días",
            PeriodType::Monthly => "El presupuesto se reinicia el 1° de cada mes",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = ParsePeriodTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PeriodType::Weekly),
            "biweekly" => Ok(PeriodType::Biweekly),
            "monthly" => Ok(PeriodType::Monthly),
            _ => Err(ParsePeriodTypeError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a string does not name a known [`PeriodType`].
pub struct ParsePeriodTypeError(pub String);

impl fmt::Display for ParsePeriodTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown period type `{}` (expected weekly, biweekly or monthly)",
            self.0
        )
    }
}

impl std::error::Error for ParsePeriodTypeError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
/// An inclusive calendar window `[start, end]` for one occurrence of a budget period.
pub struct BudgetPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BudgetPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodWindowError> {
        if end < start {
            return Err(PeriodWindowError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Days left in the window counting `as_of` itself; zero once the window has closed.
    pub fn days_remaining(&self, as_of: NaiveDate) -> i64 {
        if as_of > self.end {
            0
        } else if as_of < self.start {
            self.days()
        } else {
            (self.end - as_of).num_days() + 1
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`BudgetPeriod`] values.
pub enum PeriodWindowError {
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodWindowError::EndBeforeStart { start, end } => {
                write!(f, "period end {} precedes its start {}", end, start)
            }
        }
    }
}

impl std::error::Error for PeriodWindowError {}
