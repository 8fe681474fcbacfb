//! Issue (loan of one copy to one member) model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Active,
    Returned,
    Overdue,
}

impl IssueStatus {
    pub fn is_open(&self) -> bool {
        !matches!(self, IssueStatus::Returned)
    }
}

/// Stored issue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    pub id: String,
    pub item_id: String,
    pub member_id: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub status: IssueStatus,
    #[schema(value_type = String)]
    pub fine: Decimal,
    pub fine_paid: bool,
}

/// Issue joined with item and member for reports
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssueDetails {
    pub id: String,
    pub serial_no: Option<String>,
    pub item_name: Option<String>,
    pub author: Option<String>,
    pub membership_number: Option<String>,
    pub member_name: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub status: IssueStatus,
    /// Days past due as of the report date
    pub days_overdue: u32,
    #[schema(value_type = String)]
    pub fine: Decimal,
    pub fine_paid: bool,
}

/// Issue book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateIssue {
    pub membership_number: String,
    /// Serial number of the copy to issue (takes precedence over `item_name`)
    pub serial_no: Option<String>,
    /// Exact title, as picked from the availability list
    pub item_name: Option<String>,
    /// Defaults to today
    pub issue_date: Option<NaiveDate>,
    /// Defaults to issue date + loan period
    pub return_date: Option<NaiveDate>,
    #[validate(length(max = 500, message = "Remarks are too long"))]
    pub remarks: Option<String>,
}

/// Return quote request: locate the open issue and price the return
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReturnQuoteRequest {
    pub serial_no: String,
    /// Narrows the lookup when several members hold the same title
    pub membership_number: Option<String>,
    /// Defaults to today
    pub return_date: Option<NaiveDate>,
}

/// Priced return, shown before the fine is settled
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReturnQuote {
    pub issue_id: String,
    pub serial_no: String,
    pub item_name: String,
    pub author: Option<String>,
    pub membership_number: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: NaiveDate,
    pub days_late: u32,
    #[schema(value_type = String)]
    pub fine: Decimal,
    pub payment_required: bool,
}

/// Complete a return, settling any fine
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CompleteReturn {
    pub issue_id: String,
    /// Defaults to today
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub fine_paid: bool,
    #[validate(length(max = 500, message = "Remarks are too long"))]
    pub remarks: Option<String>,
}
