//! Authentication and session service

use std::{collections::HashMap, sync::Arc};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{UserClaims, UserInfo},
    repository::Repository,
};

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// An open login session
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Session {
    pub id: Uuid,
    pub user: UserInfo,
    pub opened_at: DateTime<Utc>,
}

/// Open sessions, keyed by session id.
///
/// Opened on a successful credential check, closed on logout; everything
/// else only reads it.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn open(&self, user: UserInfo) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            user,
            opened_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn close(&self, id: Uuid) -> Option<Session> {
        self.sessions.write().await.remove(&id)
    }

    /// Drop every session of a user (on deactivation)
    pub async fn close_for_user(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user.id != user_id);
        before - sessions.len()
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, sessions: SessionStore) -> Self {
        Self {
            repository,
            config,
            sessions,
        }
    }

    /// Check credentials, open a session and return its token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, UserInfo)> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        let user = match self.repository.users.get_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username, "Login rejected: unknown user");
                return Err(invalid());
            }
        };

        if !user.is_active {
            tracing::warn!(username, "Login rejected: inactive user");
            return Err(invalid());
        }

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(username, "Login rejected: bad password");
            return Err(invalid());
        }

        let info = UserInfo::from(&user);
        let session = self.sessions.open(info.clone()).await;

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id.clone(),
            session_id: session.id,
            role: user.role,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(username, role = %user.role, session = %session.id, "Session opened");
        Ok((token, info))
    }

    /// Resolve a bearer token to its claims, provided the session is still open
    pub async fn authenticate(&self, token: &str) -> AppResult<UserClaims> {
        let claims = UserClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        if self.sessions.get(claims.session_id).await.is_none() {
            return Err(AppError::Authentication("Session has ended".to_string()));
        }
        Ok(claims)
    }

    pub async fn logout(&self, session_id: Uuid) -> AppResult<()> {
        match self.sessions.close(session_id).await {
            Some(session) => {
                tracing::info!(username = %session.user.username, session = %session_id, "Session closed");
                Ok(())
            }
            None => Err(AppError::Authentication("Session has ended".to_string())),
        }
    }

    pub async fn current_session(&self, session_id: Uuid) -> AppResult<Session> {
        self.sessions
            .get(session_id)
            .await
            .ok_or_else(|| AppError::Authentication("Session has ended".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, User};
    use crate::repository::users::MockUserStore;
    use std::sync::Arc;

    fn user(active: bool) -> User {
        User {
            id: "1".to_string(),
            username: "adm".to_string(),
            password_hash: hash_password("adm").unwrap(),
            name: "Administrator".to_string(),
            role: Role::Admin,
            is_active: active,
        }
    }

    fn service(store: MockUserStore) -> AuthService {
        let mut repository = Repository::in_memory();
        repository.users = Arc::new(store);
        AuthService::new(repository, AuthConfig::default(), SessionStore::default())
    }

    #[test]
    fn password_hash_verifies_only_original() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("Secret", &hash).unwrap());
    }

    #[tokio::test]
    async fn login_opens_session_and_logout_closes_it() {
        let mut store = MockUserStore::new();
        let account = user(true);
        store
            .expect_get_by_username()
            .returning(move |_| Ok(Some(account.clone())));
        let auth = service(store);

        let (token, info) = auth.login("adm", "adm").await.unwrap();
        assert_eq!(info.role, Role::Admin);

        let claims = auth.authenticate(&token).await.unwrap();
        assert_eq!(claims.user_id, "1");
        assert_eq!(
            auth.current_session(claims.session_id).await.unwrap().user.username,
            "adm"
        );

        auth.logout(claims.session_id).await.unwrap();
        assert!(matches!(
            auth.authenticate(&token).await,
            Err(AppError::Authentication(_))
        ));
        assert!(auth.logout(claims.session_id).await.is_err());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let mut store = MockUserStore::new();
        let account = user(true);
        store
            .expect_get_by_username()
            .returning(move |_| Ok(Some(account.clone())));
        let auth = service(store);

        assert!(matches!(
            auth.login("adm", "nope").await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn inactive_and_unknown_users_are_rejected() {
        let mut store = MockUserStore::new();
        let inactive = user(false);
        store
            .expect_get_by_username()
            .withf(|name| name == "adm")
            .returning(move |_| Ok(Some(inactive.clone())));
        store
            .expect_get_by_username()
            .withf(|name| name == "ghost")
            .returning(|_| Ok(None));
        let auth = service(store);

        assert!(auth.login("adm", "adm").await.is_err());
        assert!(auth.login("ghost", "x").await.is_err());
    }

    #[tokio::test]
    async fn closing_user_sessions_only_touches_that_user() {
        let sessions = SessionStore::default();
        let info = UserInfo::from(&user(true));
        let mut other = info.clone();
        other.id = "2".to_string();

        let first = sessions.open(info.clone()).await;
        sessions.open(info).await;
        let kept = sessions.open(other).await;

        assert_eq!(sessions.close_for_user("1").await, 2);
        assert!(sessions.get(first.id).await.is_none());
        assert!(sessions.get(kept.id).await.is_some());
    }
}
