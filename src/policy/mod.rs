//! Lending rules: due dates, lateness, fines and membership tenures.
//!
//! Everything in here is pure. Services feed it plain dates and amounts
//! and turn a [`PolicyViolation`] into a form error for the caller.

pub mod loan;
pub mod membership;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

pub use loan::LoanPolicy;

/// A rule that blocks the requested transition until the input is corrected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    #[error("Return date cannot be before issue date")]
    ReturnBeforeIssue {
        issue_date: NaiveDate,
        return_date: NaiveDate,
    },

    #[error("Return date cannot be more than {max_days} days from issue date")]
    LoanTooLong {
        max_days: u32,
        latest: NaiveDate,
        requested: NaiveDate,
    },

    #[error("Issue date cannot be before today")]
    IssueInPast { issue_date: NaiveDate, today: NaiveDate },

    #[error("Fine payment must be confirmed before completing the transaction")]
    FineNotConfirmed { fine: Decimal },
}

impl PolicyViolation {
    /// Input field the violation is reported against
    pub fn field(&self) -> &'static str {
        match self {
            PolicyViolation::ReturnBeforeIssue { .. } | PolicyViolation::LoanTooLong { .. } => {
                "return_date"
            }
            PolicyViolation::IssueInPast { .. } => "issue_date",
            PolicyViolation::FineNotConfirmed { .. } => "fine_paid",
        }
    }
}
