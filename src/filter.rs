//! Narrowing the roster down to the entities a feedback pattern still allows.

use itertools::Itertools;

use crate::config::DisjointRule;
use crate::entity::{AttributeValue, Entity, Roster};
use crate::error::EvaluationError;
use crate::feedback::{Clue, FeedbackPattern, SetRelation};
use crate::schema::Schema;

pub struct PlausibilityFilter<'a> {
    guess: &'a Entity,
    pattern: &'a FeedbackPattern,
    schema: &'a Schema,
    disjoint: DisjointRule,
    /// Clue indices with every tag clue moved behind the scalar ones.
    order: Vec<usize>,
}

impl<'a> PlausibilityFilter<'a> {
    pub fn new(
        guess: &'a Entity,
        pattern: &'a FeedbackPattern,
        schema: &'a Schema,
        disjoint: DisjointRule,
    ) -> Self {
        let (tags, scalars): (Vec<usize>, Vec<usize>) = (0..pattern.clues().len())
            .partition(|&idx| matches!(pattern.clue(idx), Some(Clue::Tags(_))));

        Self {
            guess,
            pattern,
            schema,
            disjoint,
            order: scalars.into_iter().chain(tags).collect_vec(),
        }
    }

    /// Whether `candidate` would have produced the same feedback against the
    /// guess. Categorical and year clues are checked before any tag clue.
    pub fn admits(&self, candidate: &Entity) -> Result<bool, EvaluationError> {
        for &idx in &self.order {
            let clue = &self.pattern.clues()[idx];
            if !self.satisfies(idx, clue, candidate)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn satisfies(
        &self,
        idx: usize,
        clue: &Clue,
        candidate: &Entity,
    ) -> Result<bool, EvaluationError> {
        let guess = self.value(self.guess, idx)?;
        let value = self.value(candidate, idx)?;

        let satisfied = match (clue, guess, value) {
            (
                Clue::Matches(matches),
                AttributeValue::Categorical(g),
                AttributeValue::Categorical(h),
            ) => (g == h) == *matches,
            (Clue::Years(window), _, &AttributeValue::Year(year)) => window.contains(year),
            (Clue::Tags(relation), AttributeValue::Tags(g), AttributeValue::Tags(h)) => {
                match relation {
                    SetRelation::Exact => g == h,
                    SetRelation::Partial => !g.is_disjoint(h),
                    SetRelation::Disjoint => match self.disjoint {
                        DisjointRule::PassThrough => true,
                        DisjointRule::RequireDisjoint => g.is_disjoint(h),
                    },
                }
            }
            _ if clue_kind_differs(clue, guess) => return Err(self.malformed(self.guess, idx)),
            _ => return Err(self.malformed(candidate, idx)),
        };

        Ok(satisfied)
    }

    fn value<'e>(
        &self,
        entity: &'e Entity,
        idx: usize,
    ) -> Result<&'e AttributeValue, EvaluationError> {
        entity.value(idx).ok_or_else(|| self.malformed(entity, idx))
    }

    fn malformed(&self, entity: &Entity, idx: usize) -> EvaluationError {
        EvaluationError::MalformedRecord {
            entity: entity.name().to_owned(),
            attribute: self
                .schema
                .attributes
                .get(idx)
                .map(|attr| attr.key.clone())
                .unwrap_or_else(|| idx.to_string()),
        }
    }
}

fn clue_kind_differs(clue: &Clue, value: &AttributeValue) -> bool {
    !matches!(
        (clue, value),
        (Clue::Matches(_), AttributeValue::Categorical(_))
            | (Clue::Years(_), AttributeValue::Year(_))
            | (Clue::Tags(_), AttributeValue::Tags(_))
    )
}

/// Names of the roster entities, guess excluded, consistent with `pattern`.
pub fn plausible_pool(
    guess: &Entity,
    pattern: &FeedbackPattern,
    roster: &Roster,
    disjoint: DisjointRule,
) -> Result<Vec<String>, EvaluationError> {
    let filter = PlausibilityFilter::new(guess, pattern, roster.schema(), disjoint);
    let mut pool = Vec::new();

    for candidate in roster.iter() {
        if candidate.name() == guess.name() {
            continue;
        }
        if filter.admits(candidate)? {
            pool.push(candidate.name().to_owned());
        }
    }

    Ok(pool)
}
