//! Router assembly: HTTP endpoints, CORS, HTTP tracing and JSON error normalisation.

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::error::ApiError;
use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - the trivia API (`/categories`, `/questions`, `/searchquestions`, `/quizzes`)
/// - `GET /` redirecting to the first question page
/// - JSON error bodies for unknown paths (404) and wrong methods (405)
/// - CORS (any origin; GET/PUT/POST/DELETE/OPTIONS; Content-Type + Authorization)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::http_index))
        .route("/categories", get(http::http_get_categories))
        .route(
            "/questions",
            get(http::http_get_questions).post(http::http_post_question),
        )
        .route("/questions/:question_id", delete(http::http_delete_question))
        .route("/searchquestions", post(http::http_post_search))
        .route(
            "/categories/:category_id/questions",
            get(http::http_get_category_questions),
        )
        .route("/quizzes", post(http::http_post_quiz))
        .fallback(http::http_not_found)
        .with_state(state)
        .layer(middleware::map_response(json_method_not_allowed))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::PUT,
                    Method::POST,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// The method router answers a wrong verb with an empty 405; give it the error envelope.
async fn json_method_not_allowed(res: Response) -> Response {
    if res.status() == StatusCode::METHOD_NOT_ALLOWED {
        let allow = res.headers().get(header::ALLOW).cloned();
        let mut out = ApiError::MethodNotAllowed.into_response();
        if let Some(allow) = allow {
            out.headers_mut().insert(header::ALLOW, allow);
        }
        return out;
    }
    res
}
