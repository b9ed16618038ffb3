//! Server module for the Edudir serve crate

use crate::api::create_router;
use crate::cache::create_shared_cache;
use crate::error::ApiError;
use crate::handlers::AppState;
use crate::middleware::{
    cors_layer, create_rate_limiter, rate_limit_middleware, request_id_middleware,
    security_headers_middleware, timing_middleware,
};
use crate::ServerConfig;
use axum::{
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use edudir_core::{EdudirError, QueryEngine, Result};
use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Edudir HTTP server
pub struct EdudirServer {
    config: ServerConfig,
    app: Router,
}

impl EdudirServer {
    /// Create a new server over a loaded dataset
    pub fn new(config: ServerConfig, engine: QueryEngine) -> Result<Self> {
        let app = create_app(&config, engine)?;

        Ok(Self { config, app })
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| EdudirError::validation(format!("Invalid address {}: {}", addr, e)))?;

        let listener = TcpListener::bind(socket_addr)
            .await
            .map_err(|e| EdudirError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// In-flight requests are drained before this returns.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        tracing::info!("Starting Edudir server on {}", local);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| EdudirError::network(format!("Server error: {}", e)))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Create the Axum application with middleware
///
/// Layers, outermost first: panic catcher, HTTP trace, request id, timing,
/// security headers, CORS, compression, body limit, rate limit.
pub fn create_app(config: &ServerConfig, engine: QueryEngine) -> Result<Router> {
    let cache = config.cache.clone().map(create_shared_cache);
    tracing::info!(
        records = engine.total(),
        cache_enabled = cache.is_some(),
        "Building application"
    );

    let mut app = create_router(AppState::new(engine, cache));

    if let Some(rate_limit) = &config.rate_limit {
        let limiter = create_rate_limiter(rate_limit)?;
        app = app.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
    }

    app = app
        .layer(RequestBodyLimitLayer::new(config.max_request_size))
        .layer(CompressionLayer::new());

    if config.cors_enabled {
        app = app.layer(cors_layer());
    }

    Ok(app
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(timing_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic)))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::internal(format!("handler panicked: {}", detail)).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
