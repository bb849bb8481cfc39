// Library crate for the Onboardly backend
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    change_password, create_form_template, get_details, get_form_template, list_form_templates,
    login, obtain_token_pair, refresh_token, signup, update_details,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require a bearer access token)
    let protected_routes = Router::new()
        .route(
            "/user/details/",
            get(get_details).put(update_details).patch(change_password),
        )
        .route(
            "/employee/forms/",
            get(list_form_templates).post(create_form_template),
        )
        .route("/employee/forms/{id}/", get(get_form_template))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(|| async { "Hello, Onboardly!" }))
        // Public account routes
        .route("/user/signup/", post(signup))
        .route("/user/login/", post(login))
        .route("/user/api/token/", post(obtain_token_pair))
        .route("/user/api/token/refresh/", post(refresh_token))
        // Protected routes
        .merge(protected_routes);

    // Development-style serving of uploaded media
    if state.config.serve_media {
        router = router.nest_service("/media", ServeDir::new(&state.config.media_root));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
