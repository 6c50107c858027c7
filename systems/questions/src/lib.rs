#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Trivia question pool that gates orb collection.
//!
//! The bank hands out random questions that have not been answered correctly
//! yet. Once every question has been used the pool recycles itself, so it only
//! runs dry when nothing was loaded in the first place.

mod loader;

use std::collections::BTreeSet;

use log::warn;
use orb_maze_core::{Question, QuestionError, QuestionId};
use rand::{seq::SliceRandom, Rng};

pub use loader::{load_questions_from_path, parse_questions, LoadError};

/// Pool of questions with bookkeeping for the ones already answered.
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    used: BTreeSet<QuestionId>,
}

impl QuestionBank {
    /// Creates a bank holding the provided questions.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            used: BTreeSet::new(),
        }
    }

    /// Replaces the pool and forgets which questions were used.
    pub fn load(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.used.clear();
    }

    /// Draws a random question that has not been used yet.
    ///
    /// When every question has been used the used set is cleared first and the
    /// draw is made from the full pool.
    pub fn draw_random<R>(&mut self, rng: &mut R) -> Result<QuestionId, QuestionError>
    where
        R: Rng + ?Sized,
    {
        if self.questions.is_empty() {
            return Err(QuestionError::NoQuestionsAvailable);
        }

        let mut available = self.available();
        if available.is_empty() {
            warn!(
                "all {} questions have been used, recycling the pool",
                self.questions.len()
            );
            self.used.clear();
            available = self.available();
        }

        available
            .choose(rng)
            .copied()
            .ok_or(QuestionError::NoQuestionsAvailable)
    }

    /// Records that `id` was answered correctly. Unknown identifiers are ignored.
    pub fn mark_used(&mut self, id: QuestionId) {
        if id.get() < self.questions.len() {
            let _ = self.used.insert(id);
        }
    }

    /// Looks up a question by identifier.
    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(id.get())
    }

    /// Every loaded question in load order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of loaded questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Reports whether nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions currently marked as used.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Reports whether `id` is currently marked as used.
    #[must_use]
    pub fn is_used(&self, id: QuestionId) -> bool {
        self.used.contains(&id)
    }

    fn available(&self) -> Vec<QuestionId> {
        (0..self.questions.len())
            .map(QuestionId::new)
            .filter(|id| !self.used.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn question(text: &str) -> Question {
        Question::new(text, ["yes".to_owned(), "no".to_owned()], "yes").expect("valid question")
    }

    #[test]
    fn empty_bank_reports_no_questions() {
        let mut bank = QuestionBank::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            bank.draw_random(&mut rng),
            Err(QuestionError::NoQuestionsAvailable)
        );
    }

    #[test]
    fn draws_skip_used_questions() {
        let mut bank = QuestionBank::new(vec![question("a"), question("b")]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        bank.mark_used(QuestionId::new(0));

        for _ in 0..16 {
            assert_eq!(bank.draw_random(&mut rng), Ok(QuestionId::new(1)));
        }
    }

    #[test]
    fn mark_used_is_idempotent_and_ignores_unknown_ids() {
        let mut bank = QuestionBank::new(vec![question("a")]);
        bank.mark_used(QuestionId::new(0));
        bank.mark_used(QuestionId::new(0));
        bank.mark_used(QuestionId::new(9));
        assert_eq!(bank.used_count(), 1);
    }

    #[test]
    fn load_replaces_pool_and_resets_usage() {
        let mut bank = QuestionBank::new(vec![question("a")]);
        bank.mark_used(QuestionId::new(0));

        bank.load(vec![question("b"), question("c")]);

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.used_count(), 0);
        assert_eq!(
            bank.question(QuestionId::new(0)).map(Question::text),
            Some("b")
        );
    }
}
