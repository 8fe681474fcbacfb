//! Demo data loaded at startup when `seed.load_demo_data` is set

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{
        issue::{Issue, IssueStatus},
        item::{CatalogItem, ItemKind, ItemStatus},
        membership::{Membership, MembershipDuration, MembershipStatus},
        request::{IssueRequest, RequestStatus},
        user::{Role, User},
    },
    repository::Repository,
    services::auth::hash_password,
};

fn date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::Internal(format!("Bad seed date {}: {}", value, e)))
}

pub async fn seed_demo_data(repository: &Repository) -> AppResult<()> {
    // 1. Staff accounts
    let accounts = [
        ("1", "adm", "adm", "Administrator", Role::Admin),
        ("2", "user", "user", "Standard User", Role::User),
    ];
    for (id, username, password, name, role) in accounts {
        repository
            .users
            .insert(User {
                id: id.to_string(),
                username: username.to_string(),
                password_hash: hash_password(password)?,
                name: name.to_string(),
                role,
                is_active: true,
            })
            .await?;
    }

    // 2. Memberships
    repository
        .memberships
        .insert(Membership {
            id: "1".to_string(),
            membership_number: "MEM001".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            contact_no: "9876543210".to_string(),
            address: "123 Main St, Mumbai".to_string(),
            aadhar_no: "1234-5678-9012".to_string(),
            start_date: date("2024-01-01")?,
            end_date: date("2024-07-01")?,
            duration: MembershipDuration::SixMonths,
            status: MembershipStatus::Active,
            fine_pending: Decimal::ZERO,
        })
        .await?;
    repository
        .memberships
        .insert(Membership {
            id: "2".to_string(),
            membership_number: "MEM002".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            contact_no: "9876543211".to_string(),
            address: "456 Park Ave, Delhi".to_string(),
            aadhar_no: "1234-5678-9013".to_string(),
            start_date: date("2024-01-15")?,
            end_date: date("2025-01-15")?,
            duration: MembershipDuration::OneYear,
            status: MembershipStatus::Active,
            fine_pending: Decimal::from(50),
        })
        .await?;

    // 3. Catalog
    let items = [
        (
            "1",
            "BK001",
            ItemKind::Book,
            "The Great Gatsby",
            Some("F. Scott Fitzgerald"),
            "Fiction",
            "2023-06-01",
            3,
            2,
            ItemStatus::Available,
            350,
        ),
        (
            "2",
            "BK002",
            ItemKind::Book,
            "To Kill a Mockingbird",
            Some("Harper Lee"),
            "Fiction",
            "2023-06-15",
            2,
            0,
            ItemStatus::Issued,
            400,
        ),
        (
            "3",
            "MV001",
            ItemKind::Movie,
            "Inception",
            None,
            "Sci-Fi",
            "2023-07-01",
            2,
            2,
            ItemStatus::Available,
            500,
        ),
    ];
    for (id, serial, kind, name, author, category, procured, quantity, available, status, cost) in
        items
    {
        repository
            .items
            .insert(CatalogItem {
                id: id.to_string(),
                serial_no: serial.to_string(),
                kind,
                name: name.to_string(),
                author: author.map(str::to_string),
                category: Some(category.to_string()),
                procurement_date: date(procured)?,
                quantity,
                available,
                status,
                cost: Some(Decimal::from(cost)),
            })
            .await?;
    }

    // 4. Issues
    let issues = [
        ("1", "2", "1", "2024-10-15", "2024-10-30", IssueStatus::Overdue),
        ("2", "1", "2", "2024-10-25", "2024-11-09", IssueStatus::Active),
    ];
    for (id, item_id, member_id, issued, due, status) in issues {
        repository
            .issues
            .insert(Issue {
                id: id.to_string(),
                item_id: item_id.to_string(),
                member_id: member_id.to_string(),
                issue_date: date(issued)?,
                due_date: date(due)?,
                actual_return_date: None,
                remarks: None,
                status,
                fine: Decimal::ZERO,
                fine_paid: false,
            })
            .await?;
    }

    // 5. Requests
    repository
        .requests
        .insert(IssueRequest {
            id: "1".to_string(),
            member_id: "1".to_string(),
            item_id: "2".to_string(),
            request_date: date("2024-10-01")?,
            fulfilled_date: Some(date("2024-10-15")?),
            status: RequestStatus::Fulfilled,
        })
        .await?;
    repository
        .requests
        .insert(IssueRequest {
            id: "2".to_string(),
            member_id: "2".to_string(),
            item_id: "1".to_string(),
            request_date: date("2024-10-20")?,
            fulfilled_date: None,
            status: RequestStatus::Pending,
        })
        .await?;

    tracing::info!("Demo data loaded");
    Ok(())
}
