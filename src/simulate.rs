//! Every guess against every hypothetical answer.

use std::time::Instant;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::entity::{AttributeValue, Entity, Roster};
use crate::error::{EvaluationError, Result, RosterError};
use crate::feedback::FeedbackPattern;
use crate::filter::plausible_pool;
use crate::stats::{GuessStatistics, PlausiblePool};

#[derive(Debug, Clone, PartialEq)]
pub struct GuessReport {
    pub guess: String,
    pub pool: PlausiblePool,
    pub stats: GuessStatistics,
}

pub struct Simulator<'a> {
    roster: &'a Roster,
    config: SimulationConfig,
}

impl<'a> Simulator<'a> {
    /// Fails if the configuration is invalid or a roster year falls outside
    /// the configured bounds, since such an answer could never be plausible.
    pub fn new(roster: &'a Roster, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        for entity in roster.iter() {
            for value in entity.values() {
                if let &AttributeValue::Year(year) = value {
                    if !config.years.contains(year) {
                        return Err(RosterError::YearOutOfBounds {
                            entity: entity.name().to_owned(),
                            year,
                            earliest: config.years.earliest,
                            latest_exclusive: config.years.latest_exclusive,
                        }
                        .into());
                    }
                }
            }
        }

        Ok(Self { roster, config })
    }

    pub fn pattern(
        &self,
        guess: &Entity,
        answer: &Entity,
    ) -> Result<FeedbackPattern, EvaluationError> {
        FeedbackPattern::derive(guess, answer, self.roster.schema(), &self.config.years)
    }

    /// Plausible entities for every answer other than `guess`.
    pub fn pool_for(&self, guess: &Entity) -> Result<PlausiblePool, EvaluationError> {
        self.roster
            .iter()
            .filter(|answer| answer.name() != guess.name())
            .map(|answer| -> Result<_, EvaluationError> {
                let pattern = self.pattern(guess, answer)?;
                let plausibles =
                    plausible_pool(guess, &pattern, self.roster, self.config.disjoint)?;
                trace!(
                    guess = guess.name(),
                    answer = answer.name(),
                    ?pattern,
                    plausibles = plausibles.len()
                );
                debug_assert!(
                    plausibles.iter().any(|name| name == answer.name()),
                    "{} is not plausible against its own feedback for {}",
                    answer.name(),
                    guess.name()
                );
                Ok((answer.name().to_owned(), plausibles))
            })
            .try_collect()
    }

    pub fn evaluate_guess(&self, guess: &Entity) -> Result<GuessReport, EvaluationError> {
        let pool = self.pool_for(guess)?;
        let stats = GuessStatistics::from_pool(guess.name(), &pool)?;
        debug!(
            guess = guess.name(),
            best_case = stats.best_case,
            worst_case = stats.worst_case,
            score = stats.score,
            "guess evaluated"
        );

        Ok(GuessReport {
            guess: guess.name().to_owned(),
            pool,
            stats,
        })
    }

    /// Evaluates every guess, spread over the rayon pool. Reports come back
    /// in roster order.
    pub fn run(&self) -> Result<Vec<GuessReport>, EvaluationError> {
        let started = Instant::now();
        info!(
            entities = self.roster.len(),
            disjoint = ?self.config.disjoint,
            "evaluating every guess"
        );

        let reports = self
            .roster
            .entities()
            .par_iter()
            .map(|guess| self.evaluate_guess(guess))
            .collect::<Result<Vec<_>, _>>()?;

        info!(guesses = reports.len(), elapsed = ?started.elapsed(), "evaluation finished");
        Ok(reports)
    }

    pub fn run_sequential(&self) -> Result<Vec<GuessReport>, EvaluationError> {
        self.roster
            .iter()
            .map(|guess| self.evaluate_guess(guess))
            .try_collect()
    }
}
