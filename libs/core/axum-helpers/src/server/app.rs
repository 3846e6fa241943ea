use super::health::health_router;
use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{handle_panic, route_not_found};
use crate::middleware::request_logger;
use axum::{Json, Router, middleware, routing::get};
use core_config::{AppInfo, server::ServerConfig};
use std::io;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Starts the Axum server on the configured address with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
///
/// # Example
/// ```ignore
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// let config = ServerConfig::default();
/// create_app(router, &config).await?;
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(server_config.address()).await?;
    serve(listener, router, ShutdownCoordinator::default()).await
}

/// Serves `router` on an already bound listener until `coordinator` signals shutdown.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
) -> io::Result<()> {
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    info!("Server stopped");
    Ok(())
}

/// Wraps the API routes into the application router.
///
/// This function sets up:
/// - API routes nested under `/api`
/// - `/health` liveness endpoint
/// - OpenAPI document at `/api-docs/openapi.json`
/// - "Route not found" fallback for unmatched paths and methods
/// - Trailing slashes trimmed before routing, so `/api/products/` is `/api/products`
/// - Middleware, outermost first: request logger, trace spans, panic responder
///
/// Domain routers apply their own state before being passed in.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", products_router);
/// let app = create_router::<ApiDoc>(api_routes, app_info!());
/// ```
pub fn create_router<T>(apis: Router, app_info: AppInfo) -> Router
where
    T: OpenApi + 'static,
{
    let routes = Router::new()
        .route("/api-docs/openapi.json", get(openapi_json::<T>))
        .merge(health_router(app_info))
        .nest("/api", apis)
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(request_logger));

    // Route matching happens inside `Router`, so the path has to be trimmed
    // by a service that wraps it rather than by a layer on it.
    Router::new().fallback_service(NormalizePath::trim_trailing_slash(routes))
}

async fn openapi_json<T: OpenApi>() -> Json<utoipa::openapi::OpenApi> {
    Json(T::openapi())
}
