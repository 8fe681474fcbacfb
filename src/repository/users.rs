//! Staff users store

use async_trait::async_trait;

use super::memory::{MemoryTable, Record};
use crate::{error::AppResult, models::user::User};

impl Record for User {
    const KIND: &'static str = "User";

    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn get(&self, id: &str) -> AppResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn insert(&self, user: User) -> AppResult<User>;

    async fn update(&self, user: User) -> AppResult<User>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    table: MemoryTable<User>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.table.all().await)
    }

    async fn get(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.table.get(id).await)
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.table.find(|user| user.username == username).await)
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        self.table
            .insert_unique(user, |new, old| {
                (new.username == old.username)
                    .then(|| format!("username {}", new.username))
            })
            .await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        self.table.replace(user).await
    }
}
