//! Budget envelope model
//!
//! A member either has no budget yet or an active envelope made of a starting
//! balance, a timeframe in days and the instant the envelope started. The daily
//! limit is always derived from the first two.
//!
//! On disk a budget keeps the flat object shape: `{}` for no budget and
//! `{ startingBalance, timeframe, dailyLimit, startDate }` for an active one.
//! The stored `dailyLimit` is informational and recomputed on load.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;
use super::money::Money;

/// An active budget envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetEnvelope {
    /// Money available for the whole timeframe
    pub starting_balance: Money,

    /// Length of the budget period in days (always > 0)
    pub timeframe_days: u32,

    /// When the envelope was set or last reset
    pub start_date: DateTime<Utc>,
}

impl BudgetEnvelope {
    /// Validate raw user input and build an envelope starting at `start_date`
    pub fn new(
        starting_balance: f64,
        timeframe_days: i64,
        start_date: DateTime<Utc>,
    ) -> Result<Self, BudgetValidationError> {
        let starting_balance = validate_balance(starting_balance)?;
        let timeframe_days = u32::try_from(timeframe_days)
            .ok()
            .filter(|days| *days > 0)
            .ok_or(BudgetValidationError::InvalidTimeframe)?;

        Ok(Self {
            starting_balance,
            timeframe_days,
            start_date,
        })
    }

    /// Target average spend per day, rounded to the paisa
    pub fn daily_limit(&self) -> Money {
        self.starting_balance.split_evenly(self.timeframe_days)
    }

    /// Unrounded daily limit in rupees
    pub fn daily_limit_exact(&self) -> f64 {
        self.starting_balance.to_decimal() / f64::from(self.timeframe_days)
    }

    /// Whether a day's spending is above `starting_balance / timeframe`
    ///
    /// Compared exactly, not against the rounded [`BudgetEnvelope::daily_limit`].
    pub fn exceeds_daily_limit(&self, spent: Money) -> bool {
        i128::from(spent.paise()) * i128::from(self.timeframe_days)
            > i128::from(self.starting_balance.paise())
    }
}

/// Check that a starting balance is a positive, finite rupee amount
pub fn validate_balance(starting_balance: f64) -> Result<Money, BudgetValidationError> {
    Money::from_decimal(starting_balance)
        .filter(Money::is_positive)
        .ok_or(BudgetValidationError::InvalidBalance)
}

/// A member's budget state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BudgetRecord", into = "BudgetRecord")]
pub enum Budget {
    /// Nothing configured yet
    #[default]
    NoBudget,
    /// A configured envelope
    Active(BudgetEnvelope),
}

impl Budget {
    pub fn envelope(&self) -> Option<&BudgetEnvelope> {
        match self {
            Budget::NoBudget => None,
            Budget::Active(envelope) => Some(envelope),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Budget::Active(_))
    }

    /// Starting balance, or zero when no budget is set
    pub fn starting_balance(&self) -> Money {
        self.envelope()
            .map(|e| e.starting_balance)
            .unwrap_or_default()
    }

    pub fn daily_limit(&self) -> Option<Money> {
        self.envelope().map(BudgetEnvelope::daily_limit)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::NoBudget => write!(f, "no budget set"),
            Budget::Active(e) => write!(
                f,
                "{} over {} days ({}/day)",
                e.starting_balance,
                e.timeframe_days,
                e.daily_limit()
            ),
        }
    }
}

/// On-disk shape of a budget; every field optional so partial records load
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    starting_balance: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_days",
        deserialize_with = "lenient::or_default"
    )]
    timeframe: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    daily_limit: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    start_date: Option<String>,
}

/// Whole day counts are written as integers (`30`, not `30.0`)
fn serialize_days<S: serde::Serializer>(days: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match days {
        Some(d) if d.fract() == 0.0 && *d >= 0.0 => serializer.serialize_u64(*d as u64),
        Some(d) => serializer.serialize_f64(*d),
        None => serializer.serialize_none(),
    }
}

impl From<BudgetRecord> for Budget {
    fn from(record: BudgetRecord) -> Self {
        // A falsy or unusable starting balance means "no budget yet"
        let Some(starting_balance) = record
            .starting_balance
            .and_then(|b| validate_balance(b).ok())
        else {
            return Budget::NoBudget;
        };

        let timeframe_days = match record.timeframe {
            Some(days) if days.is_finite() && days >= 1.0 && days.fract() == 0.0 => {
                days.min(f64::from(u32::MAX)) as u32
            }
            _ => {
                tracing::warn!(
                    timeframe = ?record.timeframe,
                    "stored budget has an unusable timeframe; treating it as unset"
                );
                return Budget::NoBudget;
            }
        };

        let start_date = match record
            .start_date
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
        {
            Some(Ok(date)) => date.with_timezone(&Utc),
            other => {
                tracing::warn!(
                    start_date = ?other,
                    "stored budget has no readable start date; using the current time"
                );
                Utc::now()
            }
        };

        Budget::Active(BudgetEnvelope {
            starting_balance,
            timeframe_days,
            start_date,
        })
    }
}

impl From<Budget> for BudgetRecord {
    fn from(budget: Budget) -> Self {
        match budget {
            Budget::NoBudget => BudgetRecord::default(),
            Budget::Active(e) => BudgetRecord {
                starting_balance: Some(e.starting_balance.to_decimal()),
                timeframe: Some(f64::from(e.timeframe_days)),
                daily_limit: Some(e.daily_limit_exact()),
                start_date: Some(e.start_date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            },
        }
    }
}

/// Validation errors for budget input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetValidationError {
    InvalidBalance,
    InvalidTimeframe,
    NoBudgetToReset,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBalance => write!(f, "Please enter a valid starting balance"),
            Self::InvalidTimeframe => write!(f, "Please select a valid budget timeframe"),
            Self::NoBudgetToReset => write!(f, "No budget to reset. Please set a budget first"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
