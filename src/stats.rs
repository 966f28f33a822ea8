//! Summaries of how well a guess narrows down the answer.

use std::collections::HashMap;

use itertools::Itertools;

use crate::error::EvaluationError;

/// Hypothetical answer name to the names still plausible after the guess,
/// in roster order.
pub type PlausiblePool = Vec<(String, Vec<String>)>;

#[derive(Debug, Clone, PartialEq)]
pub struct GuessStatistics {
    pub best_case: usize,
    pub best_answers: Vec<String>,
    pub worst_case: usize,
    pub worst_answers: Vec<String>,
    pub average: f64,
    /// Sum of `1 / pool size` over every answer.
    pub score: f64,
    pub unambiguous: Vec<String>,
}

impl GuessStatistics {
    pub fn from_pool(guess: &str, pool: &PlausiblePool) -> Result<Self, EvaluationError> {
        if pool.is_empty() {
            return Err(EvaluationError::NoAnswers(guess.to_owned()));
        }

        let mut best_case = usize::MAX;
        let mut best_answers = Vec::new();
        let mut worst_case = 0;
        let mut worst_answers = Vec::new();
        let mut total = 0usize;
        let mut score = 0f64;

        for (answer, plausibles) in pool {
            let size = plausibles.len();
            if size == 0 {
                return Err(EvaluationError::EmptyPool {
                    guess: guess.to_owned(),
                    answer: answer.clone(),
                });
            }

            total += size;
            score += 1.0 / size as f64;

            if size < best_case {
                best_case = size;
                best_answers = vec![answer.clone()];
            } else if size == best_case {
                best_answers.push(answer.clone());
            }

            if size > worst_case {
                worst_case = size;
                worst_answers = vec![answer.clone()];
            } else if size == worst_case {
                worst_answers.push(answer.clone());
            }
        }

        let unambiguous = pool
            .iter()
            .filter(|(answer, plausibles)| plausibles.as_slice() == std::slice::from_ref(answer))
            .map(|(answer, _)| answer.clone())
            .collect_vec();

        Ok(Self {
            best_case,
            best_answers,
            worst_case,
            worst_answers,
            average: total as f64 / pool.len() as f64,
            score,
            unambiguous,
        })
    }
}

/// Answers grouped by pool size, from the narrowest size to the widest.
/// Sizes no answer has are skipped.
pub fn answers_by_pool_size(pool: &PlausiblePool) -> Vec<(usize, Vec<&str>)> {
    pool.iter()
        .map(|(answer, plausibles)| (plausibles.len(), answer.as_str()))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(size, _)| *size)
        .collect_vec()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerDifficulty {
    pub answer: String,
    /// Sum of the answer's pool sizes over every guess.
    pub total: usize,
    /// Number of guesses evaluated, the answer itself included.
    pub guesses: usize,
}

impl AnswerDifficulty {
    pub fn average(&self) -> f64 {
        self.total as f64 / self.guesses as f64
    }
}

/// Per-answer pool sizes rolled up across every guess, easiest first. Each
/// total is averaged over all guesses, including the one where the answer was
/// itself the guess. Ties keep the order answers were first seen in.
pub fn rank_hardest<'a, I>(pools: I) -> Vec<AnswerDifficulty>
where
    I: IntoIterator<Item = &'a PlausiblePool>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranking: Vec<AnswerDifficulty> = Vec::new();
    let mut guesses = 0;

    for pool in pools {
        guesses += 1;
        for (answer, plausibles) in pool {
            let slot = *index.entry(answer.as_str()).or_insert_with(|| {
                ranking.push(AnswerDifficulty {
                    answer: answer.clone(),
                    total: 0,
                    guesses: 0,
                });
                ranking.len() - 1
            });
            ranking[slot].total += plausibles.len();
        }
    }

    ranking
        .into_iter()
        .update(|difficulty| difficulty.guesses = guesses)
        .sorted_by(|a, b| a.average().total_cmp(&b.average()))
        .collect_vec()
}
