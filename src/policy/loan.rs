//! Loan period, lateness and fine computation

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::PolicyViolation;
use crate::{config::LoanConfig, models::issue::IssueStatus};

/// Days between issue and due date
pub const LOAN_PERIOD_DAYS: u32 = 15;

/// Flat fine charged per late day
pub const FINE_PER_DAY: Decimal = Decimal::TEN;

/// Due date for a loan starting on `issue_date`, in calendar days.
pub fn due_date(issue_date: NaiveDate, loan_days: u32) -> NaiveDate {
    issue_date
        .checked_add_days(Days::new(u64::from(loan_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole days between the due date and the return date, never negative.
pub fn days_late(due_date: NaiveDate, return_date: NaiveDate) -> u32 {
    let late = return_date.signed_duration_since(due_date).num_days();
    u32::try_from(late.max(0)).unwrap_or(u32::MAX)
}

pub fn fine_amount(days_late: u32, rate_per_day: Decimal) -> Decimal {
    Decimal::from(days_late) * rate_per_day
}

/// Status of an issue as seen on `today`.
///
/// A recorded return always wins; otherwise the issue is overdue only once
/// `today` is strictly after the due date.
pub fn issue_status(
    due_date: NaiveDate,
    actual_return_date: Option<NaiveDate>,
    today: NaiveDate,
) -> IssueStatus {
    match actual_return_date {
        Some(_) => IssueStatus::Returned,
        None if today > due_date => IssueStatus::Overdue,
        None => IssueStatus::Active,
    }
}

pub fn check_return_date(
    issue_date: NaiveDate,
    return_date: NaiveDate,
) -> Result<(), PolicyViolation> {
    if return_date < issue_date {
        return Err(PolicyViolation::ReturnBeforeIssue {
            issue_date,
            return_date,
        });
    }
    Ok(())
}

/// Validate a manually chosen due date when an issue is created.
pub fn check_initial_due_date(
    issue_date: NaiveDate,
    proposed: NaiveDate,
    max_days: u32,
) -> Result<(), PolicyViolation> {
    check_return_date(issue_date, proposed)?;

    let latest = due_date(issue_date, max_days);
    if proposed > latest {
        return Err(PolicyViolation::LoanTooLong {
            max_days,
            latest,
            requested: proposed,
        });
    }
    Ok(())
}

pub fn check_issue_date(issue_date: NaiveDate, today: NaiveDate) -> Result<(), PolicyViolation> {
    if issue_date < today {
        return Err(PolicyViolation::IssueInPast { issue_date, today });
    }
    Ok(())
}

/// A pending fine blocks completion until payment is confirmed. No fine, no confirmation needed.
pub fn check_settlement(fine: Decimal, fine_paid: bool) -> Result<(), PolicyViolation> {
    if fine > Decimal::ZERO && !fine_paid {
        return Err(PolicyViolation::FineNotConfirmed { fine });
    }
    Ok(())
}

/// Lateness and fine for one return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FineQuote {
    pub days_late: u32,
    #[schema(value_type = String)]
    pub fine: Decimal,
}

impl FineQuote {
    pub fn requires_payment(&self) -> bool {
        self.fine > Decimal::ZERO
    }
}

/// Loan rules bound to the configured period and rate
#[derive(Debug, Clone)]
pub struct LoanPolicy {
    pub loan_period_days: u32,
    pub fine_per_day: Decimal,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: LOAN_PERIOD_DAYS,
            fine_per_day: FINE_PER_DAY,
        }
    }
}

impl From<&LoanConfig> for LoanPolicy {
    fn from(config: &LoanConfig) -> Self {
        Self {
            loan_period_days: config.loan_period_days,
            fine_per_day: config.fine_per_day,
        }
    }
}

impl LoanPolicy {
    pub fn due_date(&self, issue_date: NaiveDate) -> NaiveDate {
        due_date(issue_date, self.loan_period_days)
    }

    pub fn check_initial_due_date(
        &self,
        issue_date: NaiveDate,
        proposed: NaiveDate,
    ) -> Result<(), PolicyViolation> {
        check_initial_due_date(issue_date, proposed, self.loan_period_days)
    }

    pub fn quote(&self, due_date: NaiveDate, return_date: NaiveDate) -> FineQuote {
        let days_late = days_late(due_date, return_date);
        FineQuote {
            days_late,
            fine: fine_amount(days_late, self.fine_per_day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn due_date_rolls_over_month_boundary() {
        assert_eq!(due_date(date("2024-01-20"), 15), date("2024-02-04"));
    }

    #[test]
    fn due_date_rolls_over_year_and_leap_day() {
        assert_eq!(due_date(date("2024-12-25"), 15), date("2025-01-09"));
        assert_eq!(due_date(date("2024-02-20"), 15), date("2024-03-06"));
        assert_eq!(due_date(date("2023-02-20"), 15), date("2023-03-07"));
    }

    #[test]
    fn due_date_is_always_fifteen_days_out() {
        let mut day = date("2023-01-01");
        let end = date("2025-12-31");
        while day <= end {
            let due = due_date(day, LOAN_PERIOD_DAYS);
            assert_eq!((due - day).num_days(), 15, "issue date {}", day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn early_and_on_time_returns_are_not_late() {
        let due = date("2024-10-30");
        assert_eq!(days_late(due, due), 0);
        assert_eq!(days_late(due, date("2024-10-29")), 0);
        assert_eq!(days_late(due, date("2024-01-01")), 0);
    }

    #[test]
    fn late_returns_count_whole_days() {
        let due = date("2024-10-30");
        for k in 1..=40u32 {
            let returned = due_date(due, k);
            assert_eq!(days_late(due, returned), k);
            assert_eq!(fine_amount(k, FINE_PER_DAY), Decimal::from(10 * k));
        }
    }

    #[test]
    fn zero_days_means_zero_fine() {
        assert_eq!(fine_amount(0, FINE_PER_DAY), Decimal::ZERO);
    }

    #[test]
    fn settlement_requires_confirmation_only_for_positive_fine() {
        assert!(check_settlement(Decimal::ZERO, false).is_ok());
        assert!(check_settlement(Decimal::ZERO, true).is_ok());
        assert!(check_settlement(Decimal::from(100), true).is_ok());
        assert_eq!(
            check_settlement(Decimal::from(100), false),
            Err(PolicyViolation::FineNotConfirmed {
                fine: Decimal::from(100)
            })
        );
    }

    #[test]
    fn status_is_derived_from_today() {
        let due = date("2024-10-30");
        assert_eq!(issue_status(due, None, date("2024-10-30")), IssueStatus::Active);
        assert_eq!(issue_status(due, None, date("2024-10-31")), IssueStatus::Overdue);
        assert_eq!(
            issue_status(due, Some(date("2024-11-09")), date("2024-12-01")),
            IssueStatus::Returned
        );
    }

    #[test]
    fn initial_due_date_must_stay_inside_loan_period() {
        let issued = date("2024-10-15");
        assert!(check_initial_due_date(issued, date("2024-10-30"), 15).is_ok());
        assert!(check_initial_due_date(issued, issued, 15).is_ok());

        let too_long = check_initial_due_date(issued, date("2024-10-31"), 15).unwrap_err();
        assert_eq!(too_long.field(), "return_date");
        assert!(matches!(too_long, PolicyViolation::LoanTooLong { .. }));

        let before = check_initial_due_date(issued, date("2024-10-14"), 15).unwrap_err();
        assert!(matches!(before, PolicyViolation::ReturnBeforeIssue { .. }));
    }

    #[test]
    fn issue_date_cannot_be_in_the_past() {
        let today = date("2024-10-15");
        assert!(check_issue_date(today, today).is_ok());
        assert!(check_issue_date(date("2024-10-20"), today).is_ok());
        assert!(check_issue_date(date("2024-10-14"), today).is_err());
    }

    #[test]
    fn end_to_end_overdue_return() {
        let policy = LoanPolicy::default();
        let due = policy.due_date(date("2024-10-15"));
        assert_eq!(due, date("2024-10-30"));

        let quote = policy.quote(due, date("2024-11-09"));
        assert_eq!(quote.days_late, 10);
        assert_eq!(quote.fine, Decimal::from(100));
        assert!(quote.requires_payment());
    }
}
