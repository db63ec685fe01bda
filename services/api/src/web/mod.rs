pub mod auth;
pub mod errors;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible
// to the binary that will build the web server router.
pub use auth::{login_handler, logout_handler, signup_handler};
pub use middleware::require_auth;
pub use rest::{list_courses_handler, overview_handler, remove_course_handler, upload_syllabus_handler};

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use state::AppState;

/// Uploads larger than this are rejected before the handler runs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Builds the API router: public auth routes plus the cookie-protected course routes.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/courses", get(list_courses_handler).post(upload_syllabus_handler))
        .route("/courses/{id}", delete(remove_course_handler))
        .route("/overview", get(overview_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(app_state)
}
