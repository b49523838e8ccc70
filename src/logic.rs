//! Core behaviors behind the HTTP handlers.
//!
//! Each function reads the current catalog snapshot, runs the pure pieces
//! (pager, search, quiz selector, formatter) and returns a wire DTO or an `ApiError`:
//!   - listing / category listing: an empty page is `NotFound`
//!   - search: an empty page is still a success
//!   - delete of an absent id is `Unprocessable`
//!   - create failures (missing fields, duplicate text, unknown category) are `BadRequest`
//!   - quiz exhaustion is `NotFound`

use tracing::{debug, info, instrument, warn};

use crate::domain::{Category, CategorySelector, NewQuestion};
use crate::error::ApiError;
use crate::pager::{paginate, QUESTIONS_PER_PAGE};
use crate::protocol::*;
use crate::quiz::{next_question, QuizOutcome};
use crate::search::search;
use crate::state::AppState;
use crate::store::QuestionOrder;
use crate::util::trunc_for_log;

fn category_type(categories: &[Category], id: Option<i64>) -> Option<String> {
  let id = id?;
  categories.iter().find(|c| c.id == id).map(|c| c.kind.clone())
}

#[instrument(level = "info", skip(state))]
pub async fn list_categories(state: &AppState) -> CategoriesOut {
  let categories: Vec<CategoryOut> = state.store.categories().await.iter().map(format_category).collect();
  CategoriesOut { success: true, total_categories: categories.len(), categories }
}

#[instrument(level = "info", skip(state))]
pub async fn list_questions(state: &AppState, page: usize) -> Result<QuestionListOut, ApiError> {
  let all = state.store.questions(QuestionOrder::ByCategory).await;
  let window = paginate(&all, page, QUESTIONS_PER_PAGE);
  if window.is_empty() {
    debug!(target: "trivia_backend", page, total = window.total, "Question page is empty");
    return Err(ApiError::NotFound);
  }

  let categories = state.store.categories().await;
  let current_category = category_type(&categories, window.items[0].category_id);
  Ok(QuestionListOut {
    success: true,
    questions: format_questions(&window.items)?,
    total_questions: window.total,
    categories: categories.iter().map(format_category).collect(),
    current_category,
  })
}

#[instrument(level = "info", skip(state, term), fields(term = %term.map(|t| trunc_for_log(t, 64)).unwrap_or_default()))]
pub async fn search_questions(state: &AppState, term: Option<&str>, page: usize) -> Result<QuestionPageOut, ApiError> {
  let all = state.store.questions(QuestionOrder::ByCategory).await;
  let hits = search(&all, term);
  let window = paginate(&hits, page, QUESTIONS_PER_PAGE);

  let current_category = match window.items.first() {
    Some(first) => category_type(&state.store.categories().await, first.category_id),
    None => None,
  };
  info!(target: "trivia_backend", page, hits = window.total, "Search served");
  Ok(QuestionPageOut {
    success: true,
    questions: format_questions(&window.items)?,
    total_questions: window.total,
    current_category,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn category_questions(state: &AppState, category_id: i64, page: usize) -> Result<QuestionPageOut, ApiError> {
  let Some(category) = state.store.category(category_id).await else {
    debug!(target: "trivia_backend", category_id, "Unknown category");
    return Err(ApiError::NotFound);
  };
  let in_category = state.store.questions_in_category(category_id, QuestionOrder::ById).await;
  let window = paginate(&in_category, page, QUESTIONS_PER_PAGE);
  if window.is_empty() {
    return Err(ApiError::NotFound);
  }
  Ok(QuestionPageOut {
    success: true,
    questions: format_questions(&window.items)?,
    total_questions: window.total,
    current_category: Some(category.kind),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn delete_question(state: &AppState, id: i64) -> Result<DeletedOut, ApiError> {
  if state.store.delete_question(id).await {
    info!(target: "catalog", id, "Question deleted");
    Ok(DeletedOut { success: true, deleted: id })
  } else {
    warn!(target: "catalog", id, "Delete of unknown question");
    Err(ApiError::Unprocessable)
  }
}

#[instrument(level = "info", skip(state, body))]
pub async fn create_question(state: &AppState, body: CreateQuestionIn) -> Result<CreatedOut, ApiError> {
  let new = NewQuestion {
    question: body.question.unwrap_or_default(),
    answer: body.answer.unwrap_or_default(),
    difficulty: body.difficulty.unwrap_or(0),
    category_id: body.category.unwrap_or(0),
  };
  if let Err(reason) = new.validate() {
    warn!(target: "catalog", %reason, "Rejected new question");
    return Err(ApiError::BadRequest);
  }

  let text = new.question.clone();
  match state.store.insert_question(new).await {
    Ok(q) => {
      info!(target: "catalog", id = q.id, category_id = ?q.category_id, "Question created");
      Ok(CreatedOut { success: true, question_id: q.id, question: text })
    }
    Err(e) => {
      warn!(target: "catalog", error = %e, "Question insert failed");
      Err(ApiError::BadRequest)
    }
  }
}

#[instrument(level = "info", skip(state, body), fields(previous = body.previous_questions.len()))]
pub async fn play_quiz(state: &AppState, body: QuizIn) -> Result<QuizOut, ApiError> {
  let (selector, kind) = match body.quiz_category {
    Some(c) => (CategorySelector::from_wire_id(c.id), c.kind),
    None => (CategorySelector::All, None),
  };

  let question = match next_question(state.store.as_ref(), selector, &body.previous_questions, state.selection).await {
    QuizOutcome::Next(q) => q,
    QuizOutcome::Exhausted => return Err(ApiError::NotFound),
  };

  let current_category = match (kind, selector) {
    (Some(k), _) if !k.is_empty() => k,
    (_, CategorySelector::Category(id)) => state
      .store
      .category(id)
      .await
      .map(|c| c.kind)
      .unwrap_or_else(|| "All".into()),
    (_, CategorySelector::All) => "All".into(),
  };

  info!(target: "quiz", id = question.id, %current_category, "Quiz question served");
  Ok(QuizOut {
    success: true,
    question: format_question(&question).map_err(|_| ApiError::NotFound)?,
    current_category,
  })
}
