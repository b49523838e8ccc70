//! Application state: the catalog store handle and the quiz selection policy.
//!
//! This module owns:
//!   - the `CatalogStore` shared by every request
//!   - the selection policy (from TOML or default)
//!   - loading the question bank (configured bank, or built-in seeds)

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::config::{load_config_from_env, CategoryCfg, QuestionCfg, TriviaConfig};
use crate::domain::NewQuestion;
use crate::quiz::SelectionPolicy;
use crate::seeds::{seed_categories, seed_questions};
use crate::store::{CatalogStore, MemoryCatalog, QuestionOrder};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub selection: SelectionPolicy,
}

impl AppState {
    pub fn with_store(store: Arc<dyn CatalogStore>, selection: SelectionPolicy) -> Self {
        Self { store, selection }
    }

    /// Build state from env: load config, fill an in-memory catalog from the
    /// configured bank or the built-in seeds.
    #[instrument(level = "info", skip_all)]
    pub async fn from_env() -> Self {
        let cfg = load_config_from_env().unwrap_or_default();
        let store: Arc<dyn CatalogStore> = Arc::new(MemoryCatalog::new());

        if cfg.has_bank() {
            load_bank(store.as_ref(), &cfg).await;
        } else {
            load_seeds(store.as_ref()).await;
        }

        let categories = store.categories().await.len();
        let questions = store.questions(QuestionOrder::ById).await.len();
        info!(target: "catalog", categories, questions, selection = ?cfg.quiz.selection, "Startup catalog inventory");

        Self::with_store(store, cfg.quiz.selection)
    }
}

/// Insert a configured bank. Invalid entries are logged and skipped.
#[instrument(level = "info", skip_all)]
pub async fn load_bank(store: &dyn CatalogStore, cfg: &TriviaConfig) {
    for c in &cfg.categories {
        if let Err(e) = store.insert_category(&c.kind).await {
            error!(target: "catalog", kind = %c.kind, error = %e, "Skipping bank category");
        }
    }
    let categories = store.categories().await;
    for q in &cfg.questions {
        let Some(cat) = categories.iter().find(|c| c.kind == q.category) else {
            error!(target: "catalog", category = %q.category, question = %q.question, "Skipping bank question: unknown category");
            continue;
        };
        let new = NewQuestion {
            question: q.question.clone(),
            answer: q.answer.clone(),
            difficulty: q.difficulty,
            category_id: cat.id,
        };
        if let Err(e) = store.insert_question(new).await {
            error!(target: "catalog", question = %q.question, error = %e, "Skipping bank question");
        }
    }
}

/// Insert the built-in catalog.
#[instrument(level = "info", skip_all)]
pub async fn load_seeds(store: &dyn CatalogStore) {
    let cfg = TriviaConfig {
        categories: seed_categories()
            .into_iter()
            .map(|kind| CategoryCfg { kind: kind.to_string() })
            .collect(),
        questions: seed_questions()
            .into_iter()
            .map(|(question, answer, difficulty, category)| QuestionCfg {
                question: question.to_string(),
                answer: answer.to_string(),
                difficulty,
                category: category.to_string(),
            })
            .collect(),
        ..Default::default()
    };
    load_bank(store, &cfg).await;
}
