// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, Method},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{admin, quiz, quiz::SESSION_HEADER, stats},
    state::AppState,
    utils::auth::admin_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, admin) and the stats route.
/// * Serves note audio from the assets directory.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse().expect("valid origin"),
            "http://127.0.0.1:3000".parse().expect("valid origin"),
            "http://localhost:5173".parse().expect("valid origin"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(SESSION_HEADER),
        ]);

    let quiz_routes = Router::new()
        .route("/notes", get(quiz::list_notes))
        .route("/submit", post(quiz::submit_quiz));

    let admin_routes = Router::new()
        .route(
            "/rows/{row_index}",
            put(admin::update_row).delete(admin::delete_row),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .route("/api/stats", get(stats::get_stats))
        .nest("/api/admin", admin_routes)
        .nest_service("/assets", ServeDir::new(&state.config.assets_dir))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
