//! Membership model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Membership tenure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MembershipDuration {
    #[default]
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
}

impl MembershipDuration {
    pub fn months(self) -> u32 {
        match self {
            MembershipDuration::SixMonths => 6,
            MembershipDuration::OneYear => 12,
            MembershipDuration::TwoYears => 24,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipDuration::SixMonths => "6M",
            MembershipDuration::OneYear => "1Y",
            MembershipDuration::TwoYears => "2Y",
        }
    }
}

impl std::fmt::Display for MembershipDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Inactive,
}

/// Library membership
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Membership {
    pub id: String,
    pub membership_number: String,
    pub first_name: String,
    pub last_name: String,
    pub contact_no: String,
    pub address: String,
    pub aadhar_no: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: MembershipDuration,
    pub status: MembershipStatus,
    #[schema(value_type = String)]
    pub fine_pending: Decimal,
}

impl Membership {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

/// Create membership request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateMembership {
    #[validate(length(max = 100, message = "First name is too long"))]
    pub first_name: String,
    #[validate(length(max = 100, message = "Last name is too long"))]
    pub last_name: String,
    /// Ten digit phone number
    pub contact_no: String,
    #[validate(length(max = 500, message = "Address is too long"))]
    pub address: String,
    /// National ID number (XXXX-XXXX-XXXX)
    pub aadhar_no: String,
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    /// Defaults to six months
    pub duration: Option<MembershipDuration>,
}

/// Extend membership request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExtendMembership {
    pub duration: MembershipDuration,
}
