//! Quiz selection: pick one question the client has not seen yet.
//!
//! The client resubmits its full history each round, so nothing is kept here
//! between calls. Pool rules:
//!   - the pool is the selected category (or every question for "all"), by id ascending
//!   - once the history is at least as long as the category pool, the pool widens to
//!     every question in the catalog, so a thin category never stalls a quiz
//!   - a single scan over the pool either finds an unseen question or reports `Exhausted`

use std::collections::HashSet;

use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::domain::{CategorySelector, Question};
use crate::store::{CatalogStore, QuestionOrder};

/// How an unseen candidate is chosen from the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// First unseen candidate in ascending id order.
    #[default]
    LowestUnseen,
    /// Uniform draw among the unseen candidates.
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Next(Question),
    Exhausted,
}

/// True when the category pool can no longer be trusted to hold an unseen question.
pub fn widen_to_global(previous_len: usize, pool_len: usize) -> bool {
    previous_len >= pool_len
}

/// One bounded pass over `pool`; `None` when every candidate was already served.
pub fn pick_unseen(pool: &[Question], previous: &[i64], policy: SelectionPolicy) -> Option<Question> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    match policy {
        SelectionPolicy::LowestUnseen => pool.iter().find(|q| !seen.contains(&q.id)).cloned(),
        SelectionPolicy::Random => {
            let unseen: Vec<&Question> = pool.iter().filter(|q| !seen.contains(&q.id)).collect();
            unseen.choose(&mut rand::thread_rng()).map(|q| (*q).clone())
        }
    }
}

/// Fetch the pool for `selector`, apply the widening rule and pick.
#[instrument(level = "info", skip(store, previous), fields(previous_len = previous.len()))]
pub async fn next_question(
    store: &dyn CatalogStore,
    selector: CategorySelector,
    previous: &[i64],
    policy: SelectionPolicy,
) -> QuizOutcome {
    let pool = match selector {
        CategorySelector::All => store.questions(QuestionOrder::ById).await,
        CategorySelector::Category(id) => {
            let in_category = store.questions_in_category(id, QuestionOrder::ById).await;
            if widen_to_global(previous.len(), in_category.len()) {
                debug!(target: "quiz", category_id = id, pool = in_category.len(), "Category pool spent; widening to all questions");
                store.questions(QuestionOrder::ById).await
            } else {
                in_category
            }
        }
    };

    match pick_unseen(&pool, previous, policy) {
        Some(q) => {
            debug!(target: "quiz", id = q.id, pool = pool.len(), ?policy, "Picked quiz question");
            QuizOutcome::Next(q)
        }
        None => {
            info!(target: "quiz", pool = pool.len(), "No unseen question left");
            QuizOutcome::Exhausted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewQuestion;
    use crate::store::MemoryCatalog;

    fn q(id: i64, category_id: i64) -> Question {
        Question {
            id,
            question: format!("q{id}"),
            answer: "a".into(),
            difficulty: 1,
            category_id: Some(category_id),
        }
    }

    /// Category 1 holds `science`, category 2 holds `art` questions; ids follow insertion order.
    async fn catalog(science: usize, art: usize) -> MemoryCatalog {
        let store = MemoryCatalog::new();
        store.insert_category("Science").await.unwrap();
        store.insert_category("Art").await.unwrap();
        for i in 0..science {
            store
                .insert_question(NewQuestion { question: format!("s{i}"), answer: "a".into(), difficulty: 1, category_id: 1 })
                .await
                .unwrap();
        }
        for i in 0..art {
            store
                .insert_question(NewQuestion { question: format!("a{i}"), answer: "a".into(), difficulty: 1, category_id: 2 })
                .await
                .unwrap();
        }
        store
    }

    #[test]
    fn lowest_unseen_id_wins() {
        let pool = vec![q(1, 1), q(2, 1), q(3, 1), q(4, 1)];
        let got = pick_unseen(&pool, &[1, 3], SelectionPolicy::LowestUnseen).unwrap();
        assert_eq!(got.id, 2);
    }

    #[test]
    fn fully_seen_pool_yields_none() {
        let pool = vec![q(1, 1), q(2, 1)];
        assert!(pick_unseen(&pool, &[2, 1], SelectionPolicy::LowestUnseen).is_none());
        assert!(pick_unseen(&pool, &[2, 1], SelectionPolicy::Random).is_none());
        assert!(pick_unseen(&[], &[], SelectionPolicy::LowestUnseen).is_none());
    }

    #[test]
    fn random_policy_only_returns_unseen() {
        let pool: Vec<Question> = (1..=6).map(|i| q(i, 1)).collect();
        for _ in 0..50 {
            let got = pick_unseen(&pool, &[1, 2, 4], SelectionPolicy::Random).unwrap();
            assert!([3, 5, 6].contains(&got.id));
        }
    }

    #[test]
    fn widening_threshold() {
        assert!(!widen_to_global(3, 4));
        assert!(widen_to_global(3, 3));
        assert!(widen_to_global(5, 3));
        assert!(widen_to_global(0, 0));
    }

    #[tokio::test]
    async fn serves_unseen_question_from_category() {
        let store = catalog(4, 2).await;
        let out = next_question(&store, CategorySelector::Category(1), &[1, 2, 3], SelectionPolicy::LowestUnseen).await;
        assert_eq!(out, QuizOutcome::Next(q_named(4, "s3", 1)));
    }

    #[tokio::test]
    async fn random_stays_inside_category_while_unseen_remain() {
        let store = catalog(4, 2).await;
        for _ in 0..20 {
            match next_question(&store, CategorySelector::Category(2), &[5], SelectionPolicy::Random).await {
                QuizOutcome::Next(got) => assert_eq!(got.id, 6),
                QuizOutcome::Exhausted => panic!("expected a question"),
            }
        }
    }

    #[tokio::test]
    async fn spent_category_falls_back_to_global_pool() {
        let store = catalog(3, 2).await;
        let out = next_question(&store, CategorySelector::Category(1), &[1, 2, 3], SelectionPolicy::LowestUnseen).await;
        match out {
            QuizOutcome::Next(got) => {
                assert_eq!(got.id, 4);
                assert_eq!(got.category_id, Some(2));
            }
            QuizOutcome::Exhausted => panic!("expected fallback to the global pool"),
        }
    }

    #[tokio::test]
    async fn everything_seen_is_exhausted() {
        let store = catalog(3, 0).await;
        let out = next_question(&store, CategorySelector::Category(1), &[1, 2, 3], SelectionPolicy::LowestUnseen).await;
        assert_eq!(out, QuizOutcome::Exhausted);

        let out = next_question(&store, CategorySelector::All, &[3, 1, 2], SelectionPolicy::Random).await;
        assert_eq!(out, QuizOutcome::Exhausted);
    }

    #[tokio::test]
    async fn all_selector_walks_the_whole_catalog() {
        let store = catalog(2, 2).await;
        let mut seen = Vec::new();
        while let QuizOutcome::Next(q) = next_question(&store, CategorySelector::All, &seen, SelectionPolicy::LowestUnseen).await {
            seen.push(q.id);
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    fn q_named(id: i64, text: &str, category_id: i64) -> Question {
        Question { id, question: text.into(), answer: "a".into(), difficulty: 1, category_id: Some(category_id) }
    }
}
