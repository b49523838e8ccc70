//! Catalog store capability and its in-memory implementation.
//!
//! The core only ever talks to `dyn CatalogStore`; `MemoryCatalog` keeps both
//! tables behind one lock so every write commits atomically with respect to readers.
//! Uniqueness (category type, question text), foreign keys and the category
//! cascade are enforced here at write time.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::{Category, NewQuestion, Question, QuestionPatch};
use crate::error::StoreError;

/// Scan order for question reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionOrder {
    /// Ascending question id.
    ById,
    /// Ascending category id (orphans last), ties in natural store order.
    ByCategory,
}

/// Catalog capability. The full read/write surface is public for embedders and
/// bank loaders even where the HTTP API only uses part of it.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn categories(&self) -> Vec<Category>;
    async fn category(&self, id: i64) -> Option<Category>;
    async fn insert_category(&self, kind: &str) -> Result<Category, StoreError>;
    /// Removes the category and every question referencing it.
    async fn delete_category(&self, id: i64) -> bool;

    async fn questions(&self, order: QuestionOrder) -> Vec<Question>;
    async fn questions_in_category(&self, category_id: i64, order: QuestionOrder) -> Vec<Question>;
    /// Lookup by id.
    async fn question(&self, id: i64) -> Option<Question>;
    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError>;
    /// Explicit update; same uniqueness and category checks as insert.
    async fn update_question(&self, id: i64, patch: QuestionPatch) -> Result<Question, StoreError>;
    async fn delete_question(&self, id: i64) -> bool;
}

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    next_category_id: i64,
    next_question_id: i64,
}

impl Tables {
    fn text_taken(&self, text: &str, except: Option<i64>) -> bool {
        self.questions
            .values()
            .any(|q| q.question == text && Some(q.id) != except)
    }

    fn ordered(&self, order: QuestionOrder, filter: impl Fn(&Question) -> bool) -> Vec<Question> {
        let mut out: Vec<Question> = self.questions.values().filter(|&q| filter(q)).cloned().collect();
        if order == QuestionOrder::ByCategory {
            // Stable sort keeps id order inside a category.
            out.sort_by_key(|q| (q.category_id.is_none(), q.category_id));
        }
        out
    }
}

/// In-memory `CatalogStore`. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn categories(&self) -> Vec<Category> {
        self.tables.read().await.categories.values().cloned().collect()
    }

    async fn category(&self, id: i64) -> Option<Category> {
        self.tables.read().await.categories.get(&id).cloned()
    }

    #[instrument(level = "debug", skip(self))]
    async fn insert_category(&self, kind: &str) -> Result<Category, StoreError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(StoreError::Validation("category type is required".into()));
        }
        let mut t = self.tables.write().await;
        if t.categories.values().any(|c| c.kind == kind) {
            return Err(StoreError::DuplicateCategory(kind.to_string()));
        }
        t.next_category_id += 1;
        let c = Category { id: t.next_category_id, kind: kind.to_string() };
        t.categories.insert(c.id, c.clone());
        debug!(target: "catalog", id = c.id, kind = %c.kind, "Inserted category");
        Ok(c)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_category(&self, id: i64) -> bool {
        let mut t = self.tables.write().await;
        if t.categories.remove(&id).is_none() {
            return false;
        }
        let before = t.questions.len();
        t.questions.retain(|_, q| q.category_id != Some(id));
        debug!(target: "catalog", id, cascaded = before - t.questions.len(), "Deleted category");
        true
    }

    async fn questions(&self, order: QuestionOrder) -> Vec<Question> {
        self.tables.read().await.ordered(order, |_| true)
    }

    async fn questions_in_category(&self, category_id: i64, order: QuestionOrder) -> Vec<Question> {
        self.tables
            .read()
            .await
            .ordered(order, |q| q.category_id == Some(category_id))
    }

    async fn question(&self, id: i64) -> Option<Question> {
        self.tables.read().await.questions.get(&id).cloned()
    }

    #[instrument(level = "debug", skip(self, new), fields(category_id = new.category_id))]
    async fn insert_question(&self, new: NewQuestion) -> Result<Question, StoreError> {
        new.validate().map_err(StoreError::Validation)?;
        let mut t = self.tables.write().await;
        if !t.categories.contains_key(&new.category_id) {
            return Err(StoreError::UnknownCategory(new.category_id));
        }
        if t.text_taken(&new.question, None) {
            return Err(StoreError::DuplicateQuestion(new.question));
        }
        t.next_question_id += 1;
        let q = Question {
            id: t.next_question_id,
            question: new.question,
            answer: new.answer,
            difficulty: new.difficulty,
            category_id: Some(new.category_id),
        };
        t.questions.insert(q.id, q.clone());
        debug!(target: "catalog", id = q.id, "Inserted question");
        Ok(q)
    }

    #[instrument(level = "debug", skip(self, patch))]
    async fn update_question(&self, id: i64, patch: QuestionPatch) -> Result<Question, StoreError> {
        let mut t = self.tables.write().await;
        let mut q = t.questions.get(&id).cloned().ok_or(StoreError::UnknownQuestion(id))?;

        if let Some(text) = patch.question {
            if text.trim().is_empty() {
                return Err(StoreError::Validation("question text is required".into()));
            }
            if t.text_taken(&text, Some(id)) {
                return Err(StoreError::DuplicateQuestion(text));
            }
            q.question = text;
        }
        if let Some(answer) = patch.answer {
            if answer.trim().is_empty() {
                return Err(StoreError::Validation("answer is required".into()));
            }
            q.answer = answer;
        }
        if let Some(d) = patch.difficulty {
            q.difficulty = d;
        }
        if let Some(cid) = patch.category_id {
            if !t.categories.contains_key(&cid) {
                return Err(StoreError::UnknownCategory(cid));
            }
            q.category_id = Some(cid);
        }
        t.questions.insert(id, q.clone());
        Ok(q)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_question(&self, id: i64) -> bool {
        self.tables.write().await.questions.remove(&id).is_some()
    }
}
