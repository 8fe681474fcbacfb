//! Membership management service

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::next_code;
use crate::{
    error::{AppError, AppResult, FormErrors},
    models::membership::{CreateMembership, Membership, MembershipDuration, MembershipStatus},
    policy::membership as tenure,
    repository::Repository,
};

static CONTACT_NO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid regex"));

#[derive(Clone)]
pub struct MembershipsService {
    repository: Repository,
}

impl MembershipsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Membership>> {
        self.repository.memberships.list().await
    }

    /// Get membership by number (e.g. MEM001)
    pub async fn get(&self, membership_number: &str) -> AppResult<Membership> {
        self.repository
            .memberships
            .get_by_number(membership_number)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Membership {} not found", membership_number))
            })
    }

    /// Add a membership; the number is assigned and the end date derived from the duration
    pub async fn create(&self, request: CreateMembership, today: NaiveDate) -> AppResult<Membership> {
        let mut errors = FormErrors::new();
        errors.require("first_name", &request.first_name, "First name is required");
        errors.require("last_name", &request.last_name, "Last name is required");
        if request.contact_no.trim().is_empty() {
            errors.add("contact_no", "Contact number is required");
        } else if !CONTACT_NO.is_match(request.contact_no.trim()) {
            errors.add("contact_no", "Invalid contact number");
        }
        errors.require("address", &request.address, "Address is required");
        errors.require("aadhar_no", &request.aadhar_no, "Aadhar number is required");
        errors.into_result()?;

        let _desk = self.repository.desk_lock().await;
        let existing = self.repository.memberships.list().await?;
        let membership_number = next_code(
            "MEM",
            existing.iter().map(|m| m.membership_number.as_str()),
        );

        let start_date = request.start_date.unwrap_or(today);
        let duration = request.duration.unwrap_or_default();

        let membership = Membership {
            id: Uuid::new_v4().to_string(),
            membership_number,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            contact_no: request.contact_no.trim().to_string(),
            address: request.address.trim().to_string(),
            aadhar_no: request.aadhar_no.trim().to_string(),
            start_date,
            end_date: tenure::membership_end_date(start_date, duration),
            duration,
            status: MembershipStatus::Active,
            fine_pending: Decimal::ZERO,
        };

        let created = self.repository.memberships.insert(membership).await?;
        tracing::info!(
            number = %created.membership_number,
            end_date = %created.end_date,
            "Membership added"
        );
        Ok(created)
    }

    pub async fn extend(
        &self,
        membership_number: &str,
        duration: MembershipDuration,
    ) -> AppResult<Membership> {
        let _desk = self.repository.desk_lock().await;
        let mut membership = self.get(membership_number).await?;
        tenure::extend(&mut membership, duration);
        let updated = self.repository.memberships.update(membership).await?;
        tracing::info!(
            number = %updated.membership_number,
            duration = %updated.duration,
            end_date = %updated.end_date,
            "Membership extended"
        );
        Ok(updated)
    }

    pub async fn cancel(&self, membership_number: &str) -> AppResult<Membership> {
        let _desk = self.repository.desk_lock().await;
        let mut membership = self.get(membership_number).await?;
        tenure::cancel(&mut membership);
        let updated = self.repository.memberships.update(membership).await?;
        tracing::info!(number = %updated.membership_number, "Membership cancelled");
        Ok(updated)
    }
}
