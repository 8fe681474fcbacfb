//! Business logic services

pub mod auth;
pub mod catalog;
pub mod issues;
pub mod memberships;
pub mod navigation;
pub mod requests;
pub mod users;

use crate::{config::AppConfig, policy::LoanPolicy, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub memberships: memberships::MembershipsService,
    pub catalog: catalog::CatalogService,
    pub issues: issues::IssuesService,
    pub requests: requests::RequestsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let sessions = auth::SessionStore::default();
        let policy = LoanPolicy::from(&config.loans);

        Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone(), sessions.clone()),
            memberships: memberships::MembershipsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            issues: issues::IssuesService::new(repository.clone(), policy),
            requests: requests::RequestsService::new(repository.clone()),
            users: users::UsersService::new(repository, sessions),
        }
    }
}

/// Next sequential code for `prefix`, e.g. `MEM008` after `MEM007`.
///
/// Codes that don't carry the prefix or a numeric suffix are ignored.
pub(crate) fn next_code<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let last = existing
        .filter_map(|code| code.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, last + 1)
}
