//! Membership tenure arithmetic

use chrono::{Months, NaiveDate};

use crate::models::membership::{Membership, MembershipDuration, MembershipStatus};

/// End date of a membership starting on `start`.
///
/// Calendar months are added; when the start day does not exist in the
/// target month the date is clamped to that month's last day
/// (2024-08-31 + 6M = 2025-02-28, 2024-02-29 + 1Y = 2025-02-28).
pub fn membership_end_date(start: NaiveDate, duration: MembershipDuration) -> NaiveDate {
    start
        .checked_add_months(Months::new(duration.months()))
        .unwrap_or(NaiveDate::MAX)
}

/// Extend from the current end date and reactivate.
pub fn extend(membership: &mut Membership, duration: MembershipDuration) {
    membership.end_date = membership_end_date(membership.end_date, duration);
    membership.duration = duration;
    membership.status = MembershipStatus::Active;
}

pub fn cancel(membership: &mut Membership) {
    membership.status = MembershipStatus::Inactive;
}
