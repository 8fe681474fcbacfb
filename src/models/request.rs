//! Issue request model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

/// A member asking for a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IssueRequest {
    pub id: String,
    pub member_id: String,
    pub item_id: String,
    pub request_date: NaiveDate,
    pub fulfilled_date: Option<NaiveDate>,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssueRequestDetails {
    pub id: String,
    pub membership_number: Option<String>,
    pub member_name: Option<String>,
    pub item_name: Option<String>,
    pub request_date: NaiveDate,
    pub fulfilled_date: Option<NaiveDate>,
    pub status: RequestStatus,
}
