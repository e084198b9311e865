use axum::{http::Method, routing::get, Json, Router};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{adapters::inbound::http::MessageResponse, app_state::AppState, routes};

pub fn create(app_state: AppState, app_url: &str) -> Router<()> {
    let api = Router::new()
        .route("/", get(status))
        .nest("/projects", routes::projects::router());

    let app_url = app_url.trim_end_matches('/').to_string();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    Router::new()
        .nest("/api", api)
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn status() -> Json<MessageResponse> {
    Json(MessageResponse::new("Lang Reader API is running"))
}
