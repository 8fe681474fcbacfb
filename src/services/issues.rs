//! Issue, return and fine settlement service

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, FormErrors},
    models::{
        issue::{
            CompleteReturn, CreateIssue, Issue, IssueDetails, IssueStatus, ReturnQuote,
            ReturnQuoteRequest,
        },
        item::{CatalogItem, ItemKind},
        membership::Membership,
    },
    policy::{loan, LoanPolicy},
    repository::Repository,
};

#[derive(Clone)]
pub struct IssuesService {
    repository: Repository,
    policy: LoanPolicy,
}

impl IssuesService {
    pub fn new(repository: Repository, policy: LoanPolicy) -> Self {
        Self { repository, policy }
    }

    async fn find_item(&self, serial_no: Option<&str>, name: Option<&str>) -> AppResult<CatalogItem> {
        let found = match (serial_no, name) {
            (Some(serial), _) => self.repository.items.get_by_serial(serial).await?,
            (None, Some(name)) => self.repository.items.get_by_name(name).await?,
            (None, None) => None,
        };
        found.ok_or_else(|| {
            AppError::NotFound(format!(
                "Item {} not found",
                serial_no.or(name).unwrap_or_default()
            ))
        })
    }

    async fn find_member(&self, membership_number: &str) -> AppResult<Membership> {
        self.repository
            .memberships
            .get_by_number(membership_number)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Membership {} not found", membership_number)))
    }

    /// Issue one copy of a book to a member
    pub async fn issue_item(&self, request: CreateIssue, today: NaiveDate) -> AppResult<IssueDetails> {
        let serial_no = request.serial_no.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let item_name = request.item_name.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let mut errors = FormErrors::new();
        errors.require(
            "membership_number",
            &request.membership_number,
            "Membership number is required",
        );
        if serial_no.is_none() && item_name.is_none() {
            errors.add("item_name", "Book name is required");
        }

        let issue_date = request.issue_date.unwrap_or(today);
        if let Err(violation) = loan::check_issue_date(issue_date, today) {
            errors.add(violation.field(), violation.to_string());
        }
        let due_date = request
            .return_date
            .unwrap_or_else(|| self.policy.due_date(issue_date));
        if let Err(violation) = self.policy.check_initial_due_date(issue_date, due_date) {
            errors.add(violation.field(), violation.to_string());
        }
        errors.into_result()?;

        let _desk = self.repository.desk_lock().await;
        let member = self.find_member(request.membership_number.trim()).await?;
        if !member.is_active() {
            return Err(AppError::BusinessRule(format!(
                "Membership {} is not active",
                member.membership_number
            )));
        }

        let mut item = self.find_item(serial_no, item_name).await?;
        if item.kind != ItemKind::Book {
            return Err(AppError::BusinessRule(format!(
                "{} is not a book and cannot be issued",
                item.name
            )));
        }
        if !item.has_copies() {
            return Err(AppError::BusinessRule(format!(
                "No copies of {} are available",
                item.name
            )));
        }

        item.check_out();
        let item = self.repository.items.update(item).await?;

        let issue = Issue {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            member_id: member.id.clone(),
            issue_date,
            due_date,
            actual_return_date: None,
            remarks: request.remarks.filter(|r| !r.trim().is_empty()),
            status: IssueStatus::Active,
            fine: Decimal::ZERO,
            fine_paid: false,
        };
        let issue = self.repository.issues.insert(issue).await?;

        tracing::info!(
            issue = %issue.id,
            serial = %item.serial_no,
            member = %member.membership_number,
            due_date = %issue.due_date,
            "Book issued"
        );
        Ok(details(&issue, Some(&item), Some(&member), today))
    }

    /// Locate the open issue for a copy and price its return
    pub async fn quote_return(&self, request: ReturnQuoteRequest, today: NaiveDate) -> AppResult<ReturnQuote> {
        let mut errors = FormErrors::new();
        errors.require("serial_no", &request.serial_no, "Serial number is required");
        errors.into_result()?;

        let item = self.find_item(Some(request.serial_no.trim()), None).await?;
        let member = match request.membership_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => Some(self.find_member(number).await?),
            _ => None,
        };

        let issue = self
            .repository
            .issues
            .list_open()
            .await?
            .into_iter()
            .find(|issue| {
                issue.item_id == item.id
                    && member.as_ref().map_or(true, |m| issue.member_id == m.id)
            })
            .ok_or_else(|| AppError::NotFound(format!("No open issue for {}", item.serial_no)))?;

        let member = match member {
            Some(member) => Some(member),
            None => self.repository.memberships.get(&issue.member_id).await?,
        };

        let return_date = request.return_date.unwrap_or(today);
        loan::check_return_date(issue.issue_date, return_date)?;
        let quote = self.policy.quote(issue.due_date, return_date);

        Ok(ReturnQuote {
            issue_id: issue.id,
            serial_no: item.serial_no,
            item_name: item.name,
            author: item.author,
            membership_number: member.map(|m| m.membership_number),
            issue_date: issue.issue_date,
            due_date: issue.due_date,
            return_date,
            days_late: quote.days_late,
            fine: quote.fine,
            payment_required: quote.requires_payment(),
        })
    }

    /// Record the return, provided any fine has been paid
    pub async fn complete_return(&self, request: CompleteReturn, today: NaiveDate) -> AppResult<IssueDetails> {
        let _desk = self.repository.desk_lock().await;
        let mut issue = self
            .repository
            .issues
            .get(&request.issue_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Issue {} not found", request.issue_id)))?;

        if issue.actual_return_date.is_some() {
            return Err(AppError::BusinessRule("Issue already returned".to_string()));
        }

        let return_date = request.return_date.unwrap_or(today);
        loan::check_return_date(issue.issue_date, return_date)?;
        let quote = self.policy.quote(issue.due_date, return_date);
        loan::check_settlement(quote.fine, request.fine_paid)?;

        let item = match self.repository.items.get(&issue.item_id).await? {
            Some(mut item) => {
                item.check_in();
                Some(self.repository.items.update(item).await?)
            }
            None => {
                tracing::warn!(issue = %issue.id, item = %issue.item_id, "Returned issue references a missing item");
                None
            }
        };

        issue.actual_return_date = Some(return_date);
        issue.status = IssueStatus::Returned;
        issue.fine = quote.fine;
        issue.fine_paid = quote.requires_payment();
        if let Some(remarks) = request.remarks.filter(|r| !r.trim().is_empty()) {
            issue.remarks = Some(remarks);
        }
        let issue = self.repository.issues.update(issue).await?;

        let member = self.repository.memberships.get(&issue.member_id).await?;
        tracing::info!(
            issue = %issue.id,
            days_late = quote.days_late,
            fine = %quote.fine,
            "Return completed"
        );
        Ok(details(&issue, item.as_ref(), member.as_ref(), today))
    }

    /// Issues not yet returned, with status as of `today`
    pub async fn active_issues(&self, today: NaiveDate) -> AppResult<Vec<IssueDetails>> {
        let open = self.repository.issues.list_open().await?;
        self.resolve(open, today).await
    }

    pub async fn overdue_issues(&self, today: NaiveDate) -> AppResult<Vec<IssueDetails>> {
        let active = self.active_issues(today).await?;
        Ok(active
            .into_iter()
            .filter(|issue| issue.status == IssueStatus::Overdue)
            .collect())
    }

    async fn resolve(&self, issues: Vec<Issue>, today: NaiveDate) -> AppResult<Vec<IssueDetails>> {
        let items = self.repository.items.list().await?;
        let members = self.repository.memberships.list().await?;

        Ok(issues
            .iter()
            .map(|issue| {
                let item = items.iter().find(|i| i.id == issue.item_id);
                let member = members.iter().find(|m| m.id == issue.member_id);
                details(issue, item, member, today)
            })
            .collect())
    }
}

fn details(
    issue: &Issue,
    item: Option<&CatalogItem>,
    member: Option<&Membership>,
    today: NaiveDate,
) -> IssueDetails {
    let status = loan::issue_status(issue.due_date, issue.actual_return_date, today);
    let observed = issue.actual_return_date.unwrap_or(today);

    IssueDetails {
        id: issue.id.clone(),
        serial_no: item.map(|i| i.serial_no.clone()),
        item_name: item.map(|i| i.name.clone()),
        author: item.and_then(|i| i.author.clone()),
        membership_number: member.map(|m| m.membership_number.clone()),
        member_name: member.map(Membership::full_name),
        issue_date: issue.issue_date,
        due_date: issue.due_date,
        actual_return_date: issue.actual_return_date,
        status,
        days_overdue: loan::days_late(issue.due_date, observed),
        fine: issue.fine,
        fine_paid: issue.fine_paid,
    }
}
