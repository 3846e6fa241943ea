//! API routes module

pub mod products;

use axum::Router;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes, relative to `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// The complete application: API routes plus health, docs, fallback and middleware
pub fn app(state: &AppState) -> Router {
    axum_helpers::create_router::<ApiDoc>(routes(state), state.config.app)
}
