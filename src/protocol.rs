//! Public wire shapes for the HTTP API (serde ready) and the record formatters.
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Question};
use crate::error::FormatError;
use crate::util::{lenient_i64, lenient_i64_opt, lenient_i64_vec};

/// Wire shape of a question. `category` is the owning category's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOut {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Wire shape of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOut {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Format a question. An unresolved category reference is an error, never a `null`.
pub fn format_question(q: &Question) -> Result<QuestionOut, FormatError> {
    let category = q
        .category_id
        .ok_or(FormatError::MissingReference { question_id: q.id })?;
    Ok(QuestionOut {
        id: q.id,
        question: q.question.clone(),
        answer: q.answer.clone(),
        category,
        difficulty: q.difficulty,
    })
}

pub fn format_questions(qs: &[Question]) -> Result<Vec<QuestionOut>, FormatError> {
    qs.iter().map(format_question).collect()
}

pub fn format_category(c: &Category) -> CategoryOut {
    CategoryOut { id: c.id, kind: c.kind.clone() }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct CategoriesOut {
    pub success: bool,
    pub categories: Vec<CategoryOut>,
    pub total_categories: usize,
}

/// `GET /questions`.
#[derive(Serialize)]
pub struct QuestionListOut {
    pub success: bool,
    pub questions: Vec<QuestionOut>,
    pub total_questions: usize,
    pub categories: Vec<CategoryOut>,
    pub current_category: Option<String>,
}

/// `POST /searchquestions` and `GET /categories/{id}/questions`.
#[derive(Serialize)]
pub struct QuestionPageOut {
    pub success: bool,
    pub questions: Vec<QuestionOut>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

#[derive(Serialize)]
pub struct DeletedOut {
    pub success: bool,
    pub deleted: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionIn {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64_opt")]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64_opt")]
    pub category: Option<i64>,
}

#[derive(Serialize)]
pub struct CreatedOut {
    pub success: bool,
    pub question_id: i64,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchIn {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategoryIn {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    #[serde(default, deserialize_with = "lenient_i64_vec")]
    pub previous_questions: Vec<i64>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryIn>,
}

#[derive(Serialize)]
pub struct QuizOut {
    pub success: bool,
    pub question: QuestionOut,
    pub current_category: String,
}
