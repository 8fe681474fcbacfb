//! Issue requests store

use async_trait::async_trait;

use super::memory::{MemoryTable, Record};
use crate::{error::AppResult, models::request::IssueRequest};

impl Record for IssueRequest {
    const KIND: &'static str = "Request";

    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<IssueRequest>>;

    async fn insert(&self, request: IssueRequest) -> AppResult<IssueRequest>;
}

#[derive(Default)]
pub struct InMemoryRequestStore {
    table: MemoryTable<IssueRequest>,
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn list(&self) -> AppResult<Vec<IssueRequest>> {
        Ok(self.table.all().await)
    }

    async fn insert(&self, request: IssueRequest) -> AppResult<IssueRequest> {
        self.table.insert(request).await
    }
}
