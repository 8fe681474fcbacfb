//! Staff user model, roles and session claims

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Desk roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "User",
        }
    }

    /// Landing page of the role
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::User => "/user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maintenance screens
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Reports and transactions
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::User];

/// Stored staff account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(max = 50, message = "Username is too long"))]
    pub username: String,
    pub password: String,
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
}

/// Update existing user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(max = 100, message = "Name is too long"))]
    pub name: String,
    pub is_active: bool,
    pub is_admin: bool,
}

fn default_true() -> bool {
    true
}

/// JWT claims of an open session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: String,
    pub session_id: Uuid,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }

    /// Reject the request unless the session role is in `allowed`
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AppError> {
        if self.has_any_role(allowed) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role '{}' is not permitted here",
                self.role
            )))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require_any(ADMIN_ONLY)
            .map_err(|_| AppError::Authorization("Administrator privileges required".to_string()))
    }
}
