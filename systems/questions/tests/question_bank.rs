use std::collections::HashSet;

use orb_maze_core::{Question, QuestionError, QuestionId};
use orb_maze_system_questions::QuestionBank;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bank_of(size: usize) -> QuestionBank {
    let questions = (0..size)
        .map(|index| {
            Question::new(
                format!("question {index}"),
                ["left".to_owned(), "right".to_owned()],
                "left",
            )
            .expect("valid question")
        })
        .collect();
    QuestionBank::new(questions)
}

#[test]
fn drawing_past_pool_size_never_runs_dry() {
    let mut bank = bank_of(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);

    for draw in 0..20 {
        let id = bank
            .draw_random(&mut rng)
            .unwrap_or_else(|error| panic!("draw {draw} failed: {error}"));
        bank.mark_used(id);
    }
}

#[test]
fn each_cycle_visits_every_question_once() {
    let size = 5;
    let mut bank = bank_of(size);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _cycle in 0..3 {
        let mut seen = HashSet::new();
        for _ in 0..size {
            let id = bank.draw_random(&mut rng).expect("draw succeeds");
            assert!(seen.insert(id), "question {id:?} repeated within a cycle");
            bank.mark_used(id);
        }
        assert_eq!(bank.used_count(), size);
    }
}

#[test]
fn recycling_resets_usage_before_growth_resumes() {
    let mut bank = bank_of(2);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    bank.mark_used(QuestionId::new(0));
    bank.mark_used(QuestionId::new(1));
    assert_eq!(bank.used_count(), 2);

    let id = bank.draw_random(&mut rng).expect("recycled draw");
    assert_eq!(bank.used_count(), 0, "recycling clears the used set");

    bank.mark_used(id);
    assert_eq!(bank.used_count(), 1);
}

#[test]
fn unanswered_questions_stay_eligible() {
    let mut bank = bank_of(1);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..4 {
        assert_eq!(bank.draw_random(&mut rng), Ok(QuestionId::new(0)));
        assert!(!bank.is_used(QuestionId::new(0)));
    }
}

#[test]
fn empty_bank_always_fails() {
    let mut bank = QuestionBank::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..3 {
        assert_eq!(
            bank.draw_random(&mut rng),
            Err(QuestionError::NoQuestionsAvailable)
        );
    }
}
