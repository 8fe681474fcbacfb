//! Desk screens, the roles allowed on each, and the per-role home menu.
//!
//! The HTTP routes enforce roles on their own; this table drives the menu a
//! client renders and answers whether a given screen may be opened.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::user::{Role, ADMIN_ONLY, ALL_ROLES};

pub const LOGIN_PATH: &str = "/login";

/// A screen of the desk and who may open it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub path: &'static str,
    pub title: &'static str,
    pub roles: &'static [Role],
}

const fn screen(path: &'static str, title: &'static str, roles: &'static [Role]) -> Screen {
    Screen { path, title, roles }
}

pub const SCREENS: &[Screen] = &[
    screen("/admin", "Admin Home", ADMIN_ONLY),
    screen("/user", "User Home", &[Role::User]),
    screen("/admin/maintenance", "Maintenance", ADMIN_ONLY),
    screen("/admin/maintenance/membership", "Membership", ADMIN_ONLY),
    screen("/admin/maintenance/books", "Books/Movies", ADMIN_ONLY),
    screen("/admin/maintenance/users", "User Management", ADMIN_ONLY),
    screen("/reports", "Reports", ALL_ROLES),
    screen("/reports/books", "Master List of Books", ALL_ROLES),
    screen("/reports/movies", "Master List of Movies", ALL_ROLES),
    screen("/reports/memberships", "Master List of Memberships", ALL_ROLES),
    screen("/reports/active-issues", "Active Issues", ALL_ROLES),
    screen("/reports/overdue-returns", "Overdue Returns", ALL_ROLES),
    screen("/reports/issue-requests", "Issue Requests", ALL_ROLES),
    screen("/transactions", "Transactions", ALL_ROLES),
    screen("/transactions/check-availability", "Is Book Available?", ALL_ROLES),
    screen("/transactions/issue-book", "Issue Book", ALL_ROLES),
    screen("/transactions/return-book", "Return Book", ALL_ROLES),
    screen("/transactions/pay-fine", "Pay Fine", ALL_ROLES),
];

/// Top-level modules shown on a home page, in menu order
const MODULES: &[&str] = &["/admin/maintenance", "/reports", "/transactions"];

/// Outcome of the screen guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

pub fn find_screen(path: &str) -> Option<&'static Screen> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    SCREENS.iter().find(|s| s.path == path)
}

/// Decide whether `role` may open `path`; anything else goes back to login
pub fn guard(path: &str, role: Option<Role>) -> Access {
    match (find_screen(path), role) {
        (Some(screen), Some(role)) if screen.roles.contains(&role) => Access::Allow,
        _ => Access::Redirect(LOGIN_PATH),
    }
}

/// Guard answer for one screen path
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScreenAccess {
    pub path: String,
    pub allowed: bool,
    /// Where the client goes instead when not allowed
    pub redirect: Option<String>,
}

pub fn screen_access(path: &str, role: Option<Role>) -> ScreenAccess {
    let redirect = match guard(path, role) {
        Access::Allow => None,
        Access::Redirect(to) => Some(to.to_string()),
    };
    ScreenAccess {
        path: path.to_string(),
        allowed: redirect.is_none(),
        redirect,
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavModule {
    pub title: String,
    pub path: String,
    pub sections: Vec<NavLink>,
}

/// Home page menu for a role
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Navigation {
    pub role: Role,
    pub role_label: String,
    pub home: String,
    pub modules: Vec<NavModule>,
}

fn link(screen: &Screen) -> NavLink {
    NavLink {
        title: screen.title.to_string(),
        path: screen.path.to_string(),
    }
}

pub fn home_modules(role: Role) -> Vec<NavModule> {
    MODULES
        .iter()
        .filter_map(|path| find_screen(path))
        .filter(|module| module.roles.contains(&role))
        .map(|module| {
            let prefix = format!("{}/", module.path);
            NavModule {
                title: module.title.to_string(),
                path: module.path.to_string(),
                sections: SCREENS
                    .iter()
                    .filter(|s| s.path.starts_with(&prefix) && s.roles.contains(&role))
                    .map(link)
                    .collect(),
            }
        })
        .collect()
}

pub fn navigation_for(role: Role) -> Navigation {
    Navigation {
        role,
        role_label: role.label().to_string(),
        home: role.home_path().to_string(),
        modules: home_modules(role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(modules: &[NavModule]) -> Vec<&str> {
        modules.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn admin_sees_three_modules_user_two() {
        assert_eq!(
            titles(&home_modules(Role::Admin)),
            vec!["Maintenance", "Reports", "Transactions"]
        );
        assert_eq!(
            titles(&home_modules(Role::User)),
            vec!["Reports", "Transactions"]
        );
    }

    #[test]
    fn module_sections_are_listed_in_order() {
        let modules = home_modules(Role::User);
        let transactions: Vec<&str> = modules[1].sections.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            transactions,
            vec![
                "/transactions/check-availability",
                "/transactions/issue-book",
                "/transactions/return-book",
                "/transactions/pay-fine",
            ]
        );
        assert_eq!(home_modules(Role::Admin)[0].sections.len(), 3);
    }

    #[test]
    fn guard_allows_permitted_roles_only() {
        assert_eq!(guard("/admin/maintenance/users", Some(Role::Admin)), Access::Allow);
        assert_eq!(
            guard("/admin/maintenance/users", Some(Role::User)),
            Access::Redirect(LOGIN_PATH)
        );
        assert_eq!(guard("/reports/books/", Some(Role::User)), Access::Allow);
        assert_eq!(guard("/user", Some(Role::Admin)), Access::Redirect(LOGIN_PATH));
    }

    #[test]
    fn guard_sends_anonymous_and_unknown_to_login() {
        assert_eq!(guard("/reports", None), Access::Redirect(LOGIN_PATH));
        assert_eq!(guard("/nowhere", Some(Role::Admin)), Access::Redirect(LOGIN_PATH));
    }

    #[test]
    fn screen_access_reports_the_redirect() {
        let denied = screen_access("/admin/maintenance", Some(Role::User));
        assert!(!denied.allowed);
        assert_eq!(denied.redirect.as_deref(), Some(LOGIN_PATH));

        let allowed = screen_access("/admin/maintenance", Some(Role::Admin));
        assert!(allowed.allowed);
        assert_eq!(allowed.redirect, None);
        assert_eq!(allowed.path, "/admin/maintenance");
    }

    #[test]
    fn navigation_points_home_by_role() {
        let nav = navigation_for(Role::User);
        assert_eq!(nav.home, "/user");
        assert_eq!(nav.role_label, "User");
    }
}
