// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, exams},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, exams).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store client + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    // Credentials must be allowed so the session cookie crosses from the
    // frontend origin.
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true);

    let auth_routes = Router::new().route("/login", post(auth::login));

    // Every exam route requires a verified session; the exam id is parsed by
    // the router itself, so a non-numeric id never reaches a handler.
    let exam_routes = Router::new()
        .route("/", get(exams::list_exams))
        .route("/{id}/questions", get(exams::get_exam_questions))
        .route("/{id}/submit", post(exams::submit_exam))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/exams", exam_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
