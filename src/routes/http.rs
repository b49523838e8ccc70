//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Body and path extraction failures are mapped to the error code each endpoint promises.

use std::sync::Arc;
use axum::{
  extract::{rejection::{JsonRejection, PathRejection}, Path, RawQuery, State},
  response::Redirect,
  Json,
};
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::logic::*;
use crate::pager::page_from_query;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_index() -> Redirect { Redirect::to("/questions") }

#[instrument(level = "info")]
pub async fn http_not_found() -> ApiError { ApiError::NotFound }

#[instrument(level = "info", skip(state))]
pub async fn http_get_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesOut> {
  Json(list_categories(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(
  State(state): State<Arc<AppState>>,
  RawQuery(query): RawQuery,
) -> Result<Json<QuestionListOut>, ApiError> {
  let page = page_from_query(query.as_deref());
  list_questions(&state, page).await.map(Json)
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_question(
  State(state): State<Arc<AppState>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedOut>, ApiError> {
  let Path(id) = id.map_err(|e| {
    warn!(target: "trivia_backend", error = %e, "Bad question id in path");
    ApiError::NotFound
  })?;
  delete_question(&state, id).await.map(Json)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_question(
  State(state): State<Arc<AppState>>,
  body: Result<Json<CreateQuestionIn>, JsonRejection>,
) -> Result<Json<CreatedOut>, ApiError> {
  let Json(body) = body.map_err(|e| {
    warn!(target: "trivia_backend", error = %e, "Malformed create-question body");
    ApiError::BadRequest
  })?;
  create_question(&state, body).await.map(Json)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_search(
  State(state): State<Arc<AppState>>,
  RawQuery(query): RawQuery,
  body: Result<Json<SearchIn>, JsonRejection>,
) -> Result<Json<QuestionPageOut>, ApiError> {
  let Json(body) = body.map_err(|e| {
    warn!(target: "trivia_backend", error = %e, "Malformed search body");
    ApiError::BadRequest
  })?;
  let page = page_from_query(query.as_deref());
  search_questions(&state, body.search_term.as_deref(), page).await.map(Json)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_category_questions(
  State(state): State<Arc<AppState>>,
  category_id: Result<Path<i64>, PathRejection>,
  RawQuery(query): RawQuery,
) -> Result<Json<QuestionPageOut>, ApiError> {
  let Path(category_id) = category_id.map_err(|_| ApiError::NotFound)?;
  let page = page_from_query(query.as_deref());
  category_questions(&state, category_id, page).await.map(Json)
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  body: Result<Json<QuizIn>, JsonRejection>,
) -> Result<Json<QuizOut>, ApiError> {
  let Json(body) = body.map_err(|e| {
    warn!(target: "quiz", error = %e, "Malformed quiz body");
    ApiError::NotFound
  })?;
  play_quiz(&state, body).await.map(Json)
}
