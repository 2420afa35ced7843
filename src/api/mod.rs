pub mod creators;
pub mod dashboard;
pub mod financials;
pub mod goals;
pub mod health;
pub mod payments;
pub mod sales;
pub mod users;

use crate::auth::Actor;
use crate::config::Config;
use crate::db::Repository;
use crate::domain::UserId;
use crate::error::AppError;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Count of requests currently being served.
///
/// Server-side rendition of the client loading-spinner counter: incremented
/// on entry, decremented on exit via an RAII guard so early returns and
/// errors release it too.
#[derive(Debug, Default)]
pub struct RequestGauge {
    in_flight: AtomicU64,
}

impl RequestGauge {
    pub fn acquire(self: &Arc<Self>) -> InFlightGuard {
        let now = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(in_flight = now, "request started");
        InFlightGuard {
            gauge: Arc::clone(self),
        }
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }
}

/// Decrements the gauge when dropped.
pub struct InFlightGuard {
    gauge: Arc<RequestGauge>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let now = self.gauge.in_flight.fetch_sub(1, Ordering::Relaxed) - 1;
        tracing::debug!(in_flight = now, "request finished");
    }
}

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub gauge: Arc<RequestGauge>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        Self {
            repo,
            config,
            gauge: Arc::new(RequestGauge::default()),
        }
    }

    /// Resolve the acting user from the `X-Actor-Id` header.
    ///
    /// The auth layer proper lives upstream; this seam only maps an already
    /// authenticated identity to its role and capabilities.
    pub async fn resolve_actor(&self, headers: &HeaderMap) -> Result<Actor, AppError> {
        let actor_id = headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing X-Actor-Id header".to_string()))?;

        let user = self
            .repo
            .get_user(&UserId::new(actor_id.to_string()))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("acting user {} not found", actor_id)))?;

        Ok(Actor::new(user))
    }
}

async fn track_in_flight(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let _guard = state.gauge.acquire();
    next.run(request).await
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/users", post(users::create_user).get(users::list_users))
        .route("/v1/users/:id", get(users::get_user))
        .route("/v1/users/:id/owed", get(payments::get_amount_owed))
        .route(
            "/v1/creators",
            post(creators::create_creator).get(creators::list_creators),
        )
        .route("/v1/sales", post(sales::create_sale).get(sales::list_sales))
        .route("/v1/sales/:id", put(sales::update_sale))
        .route(
            "/v1/creators/:id/financials",
            put(financials::upsert_financials).get(financials::get_financials),
        )
        .route(
            "/v1/payments",
            post(payments::create_payment).get(payments::list_payments),
        )
        .route("/v1/goals", post(goals::create_goal).get(goals::list_goals))
        .route("/v1/dashboard", get(dashboard::get_dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_in_flight,
        ))
        .layer(cors)
        .with_state(state)
}

/// Parse and validate a (month, year) query pair into a Period.
pub(crate) fn parse_period(month: Option<u32>, year: Option<i32>) -> Result<crate::domain::Period, AppError> {
    let month = month.ok_or_else(|| AppError::BadRequest("month is required".to_string()))?;
    let year = year.ok_or_else(|| AppError::BadRequest("year is required".to_string()))?;
    crate::domain::Period::new(year, month).ok_or_else(|| {
        AppError::BadRequest(format!(
            "month must be 1-12 and year {}-{}",
            crate::domain::Period::MIN_YEAR,
            crate::domain::Period::MAX_YEAR
        ))
    })
}
