//! Domain records held by the catalog: categories, questions, and the quiz category selector.

use serde::{Deserialize, Serialize};

/// A question category. `kind` is serialized as `type` (unique across the catalog).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id: i64,
  #[serde(rename = "type")]
  pub kind: String,
}

/// A stored trivia question.
/// `category_id` is nullable at the store level (orphaned rows), but every
/// served question is expected to carry one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id: i64,
  pub question: String,
  pub answer: String,
  pub difficulty: i64,
  pub category_id: Option<i64>,
}

/// Insert payload; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuestion {
  pub question: String,
  pub answer: String,
  pub difficulty: i64,
  pub category_id: i64,
}

impl NewQuestion {
  /// Creation rule: every field must be present and truthy (non-empty / non-zero).
  pub fn validate(&self) -> Result<(), String> {
    if self.question.trim().is_empty() { return Err("question text is required".into()); }
    if self.answer.trim().is_empty() { return Err("answer is required".into()); }
    if self.difficulty == 0 { return Err("difficulty is required".into()); }
    if self.category_id == 0 { return Err("category is required".into()); }
    Ok(())
  }
}

/// Partial update for an existing question. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionPatch {
  pub question: Option<String>,
  pub answer: Option<String>,
  pub difficulty: Option<i64>,
  pub category_id: Option<i64>,
}

/// Which pool the quiz draws from. Id `0` is the "all categories" sentinel on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategorySelector {
  All,
  Category(i64),
}

impl CategorySelector {
  pub fn from_wire_id(id: i64) -> Self {
    if id == 0 { CategorySelector::All } else { CategorySelector::Category(id) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_q() -> NewQuestion {
    NewQuestion {
      question: "What is the closest planet to the Sun?".into(),
      answer: "Mercury".into(),
      difficulty: 2,
      category_id: 1,
    }
  }

  #[test]
  fn valid_new_question_passes() {
    assert!(new_q().validate().is_ok());
  }

  #[test]
  fn falsy_fields_are_rejected() {
    let mut q = new_q();
    q.question = "  ".into();
    assert!(q.validate().is_err());

    let mut q = new_q();
    q.answer = String::new();
    assert!(q.validate().is_err());

    let mut q = new_q();
    q.difficulty = 0;
    assert!(q.validate().is_err());

    let mut q = new_q();
    q.category_id = 0;
    assert!(q.validate().is_err());
  }

  #[test]
  fn wire_id_zero_selects_all() {
    assert_eq!(CategorySelector::from_wire_id(0), CategorySelector::All);
    assert_eq!(CategorySelector::from_wire_id(3), CategorySelector::Category(3));
  }

  #[test]
  fn category_serializes_kind_as_type() {
    let c = Category { id: 1, kind: "Science".into() };
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v, serde_json::json!({ "id": 1, "type": "Science" }));
  }
}
