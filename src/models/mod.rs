//! Data models for Library Desk

pub mod issue;
pub mod item;
pub mod membership;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use issue::{Issue, IssueDetails, IssueStatus};
pub use item::{CatalogItem, ItemKind, ItemStatus};
pub use membership::{Membership, MembershipDuration, MembershipStatus};
pub use request::{IssueRequest, IssueRequestDetails, RequestStatus};
pub use user::{Role, User, UserClaims, UserInfo};
