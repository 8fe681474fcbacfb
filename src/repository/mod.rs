//! Repository layer: store traits and their in-memory implementations

pub mod issues;
pub mod items;
pub mod memberships;
pub mod memory;
pub mod requests;
pub mod users;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

pub use issues::IssueStore;
pub use items::ItemStore;
pub use memberships::MembershipStore;
pub use requests::RequestStore;
pub use users::UserStore;

/// Main repository struct holding one handle per store
#[derive(Clone)]
pub struct Repository {
    pub memberships: Arc<dyn MembershipStore>,
    pub items: Arc<dyn ItemStore>,
    pub issues: Arc<dyn IssueStore>,
    pub requests: Arc<dyn RequestStore>,
    pub users: Arc<dyn UserStore>,
    desk: Arc<Mutex<()>>,
}

impl Repository {
    /// Create a repository over empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            memberships: Arc::new(memberships::InMemoryMembershipStore::default()),
            items: Arc::new(items::InMemoryItemStore::default()),
            issues: Arc::new(issues::InMemoryIssueStore::default()),
            requests: Arc::new(requests::InMemoryRequestStore::default()),
            users: Arc::new(users::InMemoryUserStore::default()),
            desk: Arc::new(Mutex::new(())),
        }
    }

    /// Serialize a read-check-write sequence against every other one.
    ///
    /// Held across store calls by any operation that decides what to write
    /// from what it just read (code numbering, copy counts, returns).
    pub async fn desk_lock(&self) -> MutexGuard<'_, ()> {
        self.desk.lock().await
    }
}
