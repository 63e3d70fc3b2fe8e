//! Matchit routing configuration and request dispatch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use memstore_core::KeyedCollectionStore;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers::{self, read_body_with_timeout};

/// Shared application state, injected at construction. The store lives
/// here rather than in a global, so its lifecycle is owned by the
/// composition root.
#[derive(Clone)]
pub struct AppState {
    /// Collection store instance
    pub store: Arc<KeyedCollectionStore>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Construction time, reported as uptime by the stats endpoint
    pub started_at: DateTime<Utc>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<Route>,
    state: AppState,
}

impl Router {
    /// Creates a router over the given store and configuration.
    pub fn new(store: Arc<KeyedCollectionStore>, config: Arc<ServerConfig>) -> Self {
        let mut router = MatchitRouter::new();

        router.insert("/", Route::Home).expect("insert / route");
        router
            .insert("/health", Route::Health)
            .expect("insert /health route");
        router
            .insert("/api/users", Route::Users)
            .expect("insert /api/users route");
        router
            .insert("/api/items", Route::Items)
            .expect("insert /api/items route");
        router
            .insert("/api/items/{id}", Route::ItemDetail)
            .expect("insert /api/items/{id} route");
        router
            .insert("/api/stats", Route::Stats)
            .expect("insert /api/stats route");
        router
            .insert("/api/echo", Route::Echo)
            .expect("insert /api/echo route");

        Self {
            inner: router,
            state: AppState {
                store,
                config,
                started_at: Utc::now(),
            },
        }
    }

    /// Routes a request to its handler and renders errors as JSON
    /// responses. Never fails; unknown paths become 404s.
    pub async fn route<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let path = req.uri().path().to_string();
        match self.inner.at(&path) {
            Ok(matched) => {
                let route = *matched.value;
                let id = matched.params.get("id").map(str::to_string);
                match route.dispatch(req, id, self.state.clone()).await {
                    Ok(response) => response,
                    Err(err) => err.into(),
                }
            }
            Err(_) => ApiError::NotFound(format!("No route found for {}", path)).into(),
        }
    }
}

/// Routing table entries.
#[derive(Debug, Clone, Copy)]
enum Route {
    Home,
    Health,
    Users,
    Items,
    ItemDetail,
    Stats,
    Echo,
}

impl Route {
    /// Dispatches on method, reading the body up front for the write
    /// routes so the handlers themselves stay synchronous.
    async fn dispatch<B>(
        self,
        req: Request<B>,
        id: Option<String>,
        state: AppState,
    ) -> Result<Response<Bytes>, ApiError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let method = req.method().clone();
        let query = req.uri().query().map(str::to_string);
        let timeout_ms = state.config.request_timeout_ms;

        match self {
            Route::Home if method == Method::GET => handlers::home(),
            Route::Health if method == Method::GET => handlers::health(),
            Route::Stats if method == Method::GET => handlers::stats(&state),
            Route::Users if method == Method::GET => {
                handlers::list_users(query.as_deref(), &state)
            }
            Route::Users if method == Method::POST => {
                let body = read_body_with_timeout(req, timeout_ms).await?;
                handlers::create_user(&body, &state)
            }
            Route::Items if method == Method::GET => {
                handlers::list_items(query.as_deref(), &state)
            }
            Route::Items if method == Method::POST => {
                let body = read_body_with_timeout(req, timeout_ms).await?;
                handlers::create_item(&body, &state)
            }
            Route::ItemDetail => {
                let id = id.unwrap_or_default();
                if method == Method::GET {
                    handlers::get_item(&id, &state)
                } else if method == Method::PUT {
                    let body = read_body_with_timeout(req, timeout_ms).await?;
                    handlers::update_item(&id, &body, &state)
                } else if method == Method::DELETE {
                    handlers::delete_item(&id, &state)
                } else {
                    Err(ApiError::MethodNotAllowed)
                }
            }
            Route::Echo if method == Method::GET => handlers::echo_usage(),
            Route::Echo if method == Method::POST => {
                let body = read_body_with_timeout(req, timeout_ms).await?;
                handlers::echo(&body)
            }
            _ => Err(ApiError::MethodNotAllowed),
        }
    }
}
