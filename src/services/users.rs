//! Staff user management service

use uuid::Uuid;

use super::auth::{hash_password, SessionStore};
use crate::{
    error::{AppError, AppResult, FormErrors},
    models::user::{CreateUser, Role, UpdateUser, User, UserInfo},
    repository::Repository,
};

fn role_for(is_admin: bool) -> Role {
    if is_admin {
        Role::Admin
    } else {
        Role::User
    }
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    sessions: SessionStore,
}

impl UsersService {
    pub fn new(repository: Repository, sessions: SessionStore) -> Self {
        Self {
            repository,
            sessions,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<UserInfo>> {
        let users = self.repository.users.list().await?;
        Ok(users.iter().map(UserInfo::from).collect())
    }

    pub async fn create(&self, request: CreateUser) -> AppResult<UserInfo> {
        let mut errors = FormErrors::new();
        errors.require("username", &request.username, "Username is required");
        errors.require("password", &request.password, "Password is required");
        errors.require("name", &request.name, "Name is required");
        errors.into_result()?;

        let _desk = self.repository.desk_lock().await;
        let username = request.username.trim().to_string();
        if self.repository.users.get_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash: hash_password(&request.password)?,
            name: request.name.trim().to_string(),
            role: role_for(request.is_admin),
            is_active: request.is_active,
        };

        let created = self.repository.users.insert(user).await?;
        tracing::info!(username = %created.username, role = %created.role, "User created");
        Ok(UserInfo::from(&created))
    }

    /// Update name, active flag and role; deactivation or a role change ends open sessions
    pub async fn update(&self, id: &str, request: UpdateUser) -> AppResult<UserInfo> {
        let mut errors = FormErrors::new();
        errors.require("name", &request.name, "Name is required");
        errors.into_result()?;

        let _desk = self.repository.desk_lock().await;
        let mut user = self
            .repository
            .users
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        let previous_role = user.role;
        user.name = request.name.trim().to_string();
        user.is_active = request.is_active;
        user.role = role_for(request.is_admin);
        let updated = self.repository.users.update(user).await?;

        // Tokens carry the role they were issued with
        if !updated.is_active || updated.role != previous_role {
            let closed = self.sessions.close_for_user(&updated.id).await;
            if closed > 0 {
                tracing::info!(
                    username = %updated.username,
                    role = %updated.role,
                    active = updated.is_active,
                    closed,
                    "Sessions closed after account change"
                );
            }
        }

        tracing::info!(username = %updated.username, active = updated.is_active, "User updated");
        Ok(UserInfo::from(&updated))
    }
}
