use crate::config::ApiConfig;
use crate::handlers;
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, post, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Read-only state shared by every request. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

fn api_router() -> Router<AppState> {
    let endpoints: [(&str, MethodRouter<AppState>); 4] = [
        ("/health/", get(handlers::health_check)),
        ("/calculate/", post(handlers::calculate)),
        ("/hello/", get(handlers::hello_async)),
        ("/process/", post(handlers::process_data)),
    ];

    // Serve `/health` as well as `/health/` instead of redirecting.
    endpoints
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router
                .route(path, method_router.clone())
                .route(path.trim_end_matches('/'), method_router)
        })
}

async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}

pub fn build_router(state: AppState) -> Router {
    let base_path = state.config.base_path.as_str();

    let router = if base_path.is_empty() {
        api_router()
    } else {
        Router::new().nest(base_path, api_router())
    };

    router
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(not_found)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: ApiConfig) -> Result<Self, AppError> {
        let addr = config.common.socket_addr()?;
        let state = AppState::new(config);
        let app = build_router(state.clone());

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            base_path = %state.config.base_path,
            "Listening on {}",
            port
        );

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
