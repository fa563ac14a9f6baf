//! API Handlers
//!
//! HTTP request handlers for each order service endpoint.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar},
    WithRejection,
};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::{
    CreateOrderForm, DashboardResponse, HealthResponse, LoginForm, LoginPageResponse,
    SentResponse, StatsResponse,
};
use crate::notify::{EmailRequest, Notifier};
use crate::orders::OrderService;
use crate::session::{session_cookie, CurrentUser, SessionStore, SESSION_COOKIE};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub sessions: SessionStore,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(orders: OrderService, sessions: SessionStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            orders,
            sessions,
            notifier,
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// Handler for GET /login
///
/// Target of the redirect for requests without a session.
pub async fn login_page_handler() -> Json<LoginPageResponse> {
    Json(LoginPageResponse::new())
}

/// Handler for POST /login
///
/// Opens a session for the submitted email and sends the user to the dashboard.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, AppError>,
) -> Result<(CookieJar, Redirect)> {
    if let Some(error_msg) = form.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let email = form.email.trim().to_string();
    let token = state.sessions.create(email.clone()).await;
    info!(user = %email, "User logged in");

    Ok((jar.add(session_cookie(token)), Redirect::to("/")))
}

/// Handler for POST /logout
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}

/// Handler for GET /
///
/// Lists every order through the order list cache.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    CurrentUser(email): CurrentUser,
) -> Result<Json<DashboardResponse>> {
    let orders = state.orders.list_orders(&email).await?;
    Ok(Json(DashboardResponse::new(email, orders)))
}

/// Handler for POST /orders
///
/// Validates the form before touching the store, creates the order, and
/// redirects back to the dashboard.
pub async fn create_order_handler(
    State(state): State<AppState>,
    CurrentUser(email): CurrentUser,
    WithRejection(Form(form), _): WithRejection<Form<CreateOrderForm>, AppError>,
) -> Result<Redirect> {
    let draft = form.into_draft().map_err(AppError::Validation)?;
    state.orders.create_order(&email, draft).await?;
    Ok(Redirect::to("/"))
}

/// Handler for GET /sent
///
/// Asks the notification service to confirm the user's orders. A failing
/// notification service is logged and reported in the body, never as an
/// HTTP error.
pub async fn sent_handler(
    State(state): State<AppState>,
    CurrentUser(email): CurrentUser,
) -> Json<SentResponse> {
    let request = EmailRequest::order_confirmation(email.clone());

    let delivered = match state.notifier.send(&request).await {
        Ok(()) => true,
        Err(e) => {
            warn!(recipient = %email, error = %e, "Error calling notification service");
            false
        }
    };

    Json(SentResponse::new(delivered, email))
}

/// Handler for GET /stats
///
/// Returns order list cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.orders.cache().stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
