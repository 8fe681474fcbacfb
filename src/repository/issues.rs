//! Issues store

use async_trait::async_trait;

use super::memory::{MemoryTable, Record};
use crate::{error::AppResult, models::issue::Issue};

impl Record for Issue {
    const KIND: &'static str = "Issue";

    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Issue>>;

    async fn get(&self, id: &str) -> AppResult<Option<Issue>>;

    /// Issues with no recorded return, oldest first
    async fn list_open(&self) -> AppResult<Vec<Issue>>;

    async fn insert(&self, issue: Issue) -> AppResult<Issue>;

    async fn update(&self, issue: Issue) -> AppResult<Issue>;
}

#[derive(Default)]
pub struct InMemoryIssueStore {
    table: MemoryTable<Issue>,
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn list(&self) -> AppResult<Vec<Issue>> {
        Ok(self.table.all().await)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Issue>> {
        Ok(self.table.get(id).await)
    }

    async fn list_open(&self) -> AppResult<Vec<Issue>> {
        let mut open = self
            .table
            .filter(|issue| issue.actual_return_date.is_none())
            .await;
        open.sort_by_key(|issue| issue.issue_date);
        Ok(open)
    }

    async fn insert(&self, issue: Issue) -> AppResult<Issue> {
        self.table.insert(issue).await
    }

    async fn update(&self, issue: Issue) -> AppResult<Issue> {
        self.table.replace(issue).await
    }
}
