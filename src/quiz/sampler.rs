// src/quiz/sampler.rs

use rand::{Rng, seq::SliceRandom, seq::index};

use crate::models::question::{ClientQuestion, Question};

/// Picks `min(requested_count, questions.len())` distinct questions uniformly
/// at random, in random order, and shuffles each one's options.
///
/// Options keep their original letter; only their position changes. The
/// answer is never copied into the output.
pub fn sample_questions<R: Rng + ?Sized>(
    questions: &[Question],
    requested_count: usize,
    rng: &mut R,
) -> Vec<ClientQuestion> {
    let amount = requested_count.min(questions.len());
    let picked = index::sample(rng, questions.len(), amount);

    picked
        .into_iter()
        .map(|i| shuffled(&questions[i], &mut *rng))
        .collect()
}

fn shuffled<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ClientQuestion {
    let mut options = question.options.clone();
    options.shuffle(rng);

    ClientQuestion {
        id: question.id.clone(),
        text: question.text.clone(),
        options,
    }
}
