//! Memberships store

use async_trait::async_trait;

use super::memory::{MemoryTable, Record};
use crate::{error::AppResult, models::membership::Membership};

impl Record for Membership {
    const KIND: &'static str = "Membership";

    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Membership>>;

    async fn get(&self, id: &str) -> AppResult<Option<Membership>>;

    async fn get_by_number(&self, membership_number: &str) -> AppResult<Option<Membership>>;

    async fn insert(&self, membership: Membership) -> AppResult<Membership>;

    async fn update(&self, membership: Membership) -> AppResult<Membership>;
}

#[derive(Default)]
pub struct InMemoryMembershipStore {
    table: MemoryTable<Membership>,
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn list(&self) -> AppResult<Vec<Membership>> {
        Ok(self.table.all().await)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Membership>> {
        Ok(self.table.get(id).await)
    }

    async fn get_by_number(&self, membership_number: &str) -> AppResult<Option<Membership>> {
        Ok(self
            .table
            .find(|m| m.membership_number.eq_ignore_ascii_case(membership_number))
            .await)
    }

    async fn insert(&self, membership: Membership) -> AppResult<Membership> {
        self.table
            .insert_unique(membership, |new, old| {
                new.membership_number.eq_ignore_ascii_case(&old.membership_number)
                    .then(|| format!("number {}", new.membership_number))
            })
            .await
    }

    async fn update(&self, membership: Membership) -> AppResult<Membership> {
        self.table.replace(membership).await
    }
}
