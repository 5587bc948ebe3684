//! # Session Context
//!
//! Logged-in staff are identified by an opaque bearer token issued at login.
//! Handlers never look at ambient state to find out who is calling; they take
//! a [`CurrentUser`] argument, which axum resolves from the
//! `Authorization: Bearer <token>` header before the handler runs.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use hallbook_core::errors::VenueError;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// How long a login stays valid when no other lifetime is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug)]
struct Session {
    username: String,
    started: Instant,
}

/// In-memory map of session tokens to usernames.
///
/// A session ends at logout or once it is older than the store's TTL.
/// Expired entries are dropped when they are looked up and whenever a new
/// session starts, so abandoned logins do not pile up.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_live(&self, session: &Session) -> bool {
        session.started.elapsed() < self.ttl
    }

    /// Starts a session for `username` and returns its token.
    pub async fn create(&self, username: &str) -> Uuid {
        let token = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| self.is_live(session));
        sessions.insert(
            token,
            Session {
                username: username.to_string(),
                started: Instant::now(),
            },
        );
        token
    }

    pub async fn resolve(&self, token: Uuid) -> Option<String> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&token) {
                None => return None,
                Some(session) if self.is_live(session) => {
                    return Some(session.username.clone());
                }
                Some(_) => {}
            }
        }

        self.sessions.write().await.remove(&token);
        None
    }

    /// Ends one session, returning the user it belonged to.
    pub async fn revoke(&self, token: Uuid) -> Option<String> {
        self.sessions
            .write()
            .await
            .remove(&token)
            .map(|session| session.username)
    }

    /// Ends every session of `username`. Returns how many were removed.
    pub async fn revoke_user(&self, username: &str) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.username != username);
        before - sessions.len()
    }

    /// Number of sessions held, expired ones included until they are swept.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The staff member making the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: Uuid,
    pub username: String,
    pub is_admin: bool,
}

impl CurrentUser {
    /// Fails with 403 unless the caller is the administrator.
    pub fn require_admin(&self, message: &str) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError(VenueError::Authorization(message.to_string())))
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError(VenueError::Authentication("Login required".to_string())))?;

        let username = state.sessions.resolve(token).await.ok_or_else(|| {
            AppError(VenueError::Authentication(
                "Session expired or invalid".to_string(),
            ))
        })?;

        Ok(CurrentUser {
            token,
            is_admin: username == state.admin_username,
            username,
        })
    }
}
