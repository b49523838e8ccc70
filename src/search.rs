//! Case-insensitive substring search over question text.

use crate::domain::Question;

/// Keep the questions whose text contains `term`, ignoring case.
/// An empty or absent term keeps everything. Input order is preserved and the
/// source slice is left untouched.
pub fn search(questions: &[Question], term: Option<&str>) -> Vec<Question> {
  let needle = term.unwrap_or("").to_lowercase();
  if needle.is_empty() {
    return questions.to_vec();
  }
  questions
    .iter()
    .filter(|q| q.question.to_lowercase().contains(&needle))
    .cloned()
    .collect()
}
