//! Session Module
//!
//! Maps opaque `session_id` cookie tokens to the email a user logged in with.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_id";

// == Session Store ==
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `email` and returns its token. Any earlier
    /// session of the same email is closed, so the map holds at most one
    /// token per email.
    pub async fn create(&self, email: impl Into<String>) -> String {
        let email = email.into();
        let token = Uuid::new_v4().to_string();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, owner| *owner != email);
        sessions.insert(token.clone(), email);
        token
    }

    pub async fn email_for(&self, token: &str) -> Option<String> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Ends a session. Unknown tokens are ignored.
    pub async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Number of open sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Builds the cookie handed out on login.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// == Current User ==
/// Email of the logged-in user. Requests without a live session are
/// redirected to `/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| Redirect::temporary("/login"))?;

        let sessions = SessionStore::from_ref(state);
        sessions
            .email_for(&token)
            .await
            .map(CurrentUser)
            .ok_or_else(|| Redirect::temporary("/login"))
    }
}
