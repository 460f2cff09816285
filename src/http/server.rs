//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with proxy, management and asset routes
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, on, MethodFilter, MethodRouter};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::http::assets;
use crate::proxy::handler::{proxy_path, proxy_root};
use crate::proxy::{ProxyResolver, RequestForwarder};
use crate::store::ProxyStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<ProxyStore>,
    pub resolver: Arc<ProxyResolver>,
    pub forwarder: Arc<RequestForwarder>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let store = Arc::new(ProxyStore::new(&config.store.path));
        let resolver = Arc::new(ProxyResolver::new(store.clone()));
        let forwarder = Arc::new(RequestForwarder::new(&config.upstream)?);

        let state = AppState {
            config: Arc::new(config.clone()),
            store,
            resolver,
            forwarder,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/proxy/{proxy_id}", proxy_methods(proxy_root))
            .route("/proxy/{proxy_id}/", proxy_methods(proxy_root))
            .route("/proxy/{proxy_id}/{*path}", proxy_methods(proxy_path))
            .merge(api::management_router().layer(CorsLayer::permissive()))
            .route("/", get(assets::serve_index))
            .fallback(assets::serve_asset)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The proxy surface accepts exactly the forwardable methods.
fn proxy_methods<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState>,
    T: 'static,
{
    let methods = MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE)
        .or(MethodFilter::PATCH)
        .or(MethodFilter::OPTIONS);
    on(methods, handler)
}
