/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use littlelemon_api::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::in_memory(config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use littlelemon_shared::{
    auth::{
        middleware::authenticate,
        policy::{AccessPolicy, PolicyTable, PUBLIC_SUBMISSION, READ_OPEN_WRITE_AUTHENTICATED},
    },
    store::{
        memory::{MemoryBookingStore, MemoryMenuStore},
        postgres::{PgBookingStore, PgMenuStore},
        BookingRepository, MenuRepository,
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Menu item storage
    pub menu: Arc<dyn MenuRepository>,

    /// Booking storage
    pub bookings: Arc<dyn BookingRepository>,

    /// Database pool, when running against PostgreSQL
    pub db: Option<PgPool>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state over arbitrary repositories
    pub fn new(
        menu: Arc<dyn MenuRepository>,
        bookings: Arc<dyn BookingRepository>,
        db: Option<PgPool>,
        config: Config,
    ) -> Self {
        Self {
            menu,
            bookings,
            db,
            config: Arc::new(config),
        }
    }

    /// Creates state backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self::new(
            Arc::new(PgMenuStore::new(pool.clone())),
            Arc::new(PgBookingStore::new(pool.clone())),
            Some(pool),
            config,
        )
    }

    /// Creates state backed by empty in-memory stores
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            Arc::new(MemoryMenuStore::new()),
            Arc::new(MemoryBookingStore::new()),
            None,
            config,
        )
    }

    /// Gets JWT secret for token validation
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// State for the per-route-group access guard
#[derive(Clone)]
pub struct PolicyGuard {
    table: PolicyTable,
    jwt_secret: Arc<str>,
}

impl PolicyGuard {
    /// Creates a guard enforcing `table` with the state's JWT secret
    pub fn new(state: &AppState, table: PolicyTable) -> Self {
        Self {
            table,
            jwt_secret: Arc::from(state.jwt_secret()),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                      # Health check (open)
/// ├── /menu/                       # Menu resource (read open, write authenticated)
/// │   ├── GET  POST /
/// │   └── GET  PUT  DELETE /:id/
/// ├── /booking/                    # Booking resource (read open, write authenticated)
/// │   ├── GET  POST /
/// │   └── GET  PUT  DELETE /:id/
/// ├── /bookings                    # Public conflict-guarded submission (open)
/// └── pages                        # /, /home/, /about/, /book/, /reservations/,
///                                  # /menu-page/, /menu_item/:id/
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Access policy guard (per route group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let menu_routes = Router::new()
        .route(
            "/menu/",
            get(routes::menu::list_menu_items).post(routes::menu::create_menu_item),
        )
        .route(
            "/menu/:id/",
            get(routes::menu::get_menu_item)
                .put(routes::menu::update_menu_item)
                .delete(routes::menu::delete_menu_item),
        )
        .layer(axum::middleware::from_fn_with_state(
            PolicyGuard::new(&state, READ_OPEN_WRITE_AUTHENTICATED),
            policy_guard_layer,
        ));

    let booking_routes = Router::new()
        .route(
            "/booking/",
            get(routes::booking::list_bookings).post(routes::booking::create_booking),
        )
        .route(
            "/booking/:id/",
            get(routes::booking::get_booking)
                .put(routes::booking::update_booking)
                .delete(routes::booking::delete_booking),
        )
        .layer(axum::middleware::from_fn_with_state(
            PolicyGuard::new(&state, READ_OPEN_WRITE_AUTHENTICATED),
            policy_guard_layer,
        ));

    let reservation_routes = Router::new()
        .route(
            "/bookings",
            get(routes::reservations::bookings_for_date)
                .post(routes::reservations::submit_booking),
        )
        .layer(axum::middleware::from_fn_with_state(
            PolicyGuard::new(&state, PUBLIC_SUBMISSION),
            policy_guard_layer,
        ));

    let cors = if state.config.cors_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .merge(menu_routes)
        .merge(booking_routes)
        .merge(reservation_routes)
        .merge(routes::pages::router())
        .fallback(route_not_found)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Access policy middleware layer
///
/// Looks up the request method in the route group's policy table. Open
/// requests pass straight through; authenticated ones must carry a valid
/// token, and get an `AuthContext` inserted into request extensions.
async fn policy_guard_layer(
    State(guard): State<PolicyGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if guard.table.policy_for(req.method()) == AccessPolicy::Open {
        return Ok(next.run(req).await);
    }

    let auth_context = authenticate(req.headers(), &guard.jwt_secret).map_err(|e| {
        tracing::debug!(method = %req.method(), uri = %req.uri(), error = %e, "Rejected unauthenticated write");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}
