//! Feedback a guess would receive against a hidden answer.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::config::YearBounds;
use crate::entity::{AttributeValue, Entity};
use crate::error::EvaluationError;
use crate::schema::{AttributeKind, Schema};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SetRelation {
    Exact,
    Partial,
    Disjoint,
}

impl SetRelation {
    pub fn classify(answer: &BTreeSet<String>, guess: &BTreeSet<String>) -> Self {
        if answer == guess {
            Self::Exact
        } else if !answer.is_disjoint(guess) {
            Self::Partial
        } else {
            Self::Disjoint
        }
    }
}

/// Inclusive range of release years a candidate may have.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct YearWindow {
    pub first: i32,
    pub last: i32,
}

impl YearWindow {
    pub fn exactly(year: i32) -> Self {
        Self {
            first: year,
            last: year,
        }
    }

    /// Years released strictly before `year`.
    pub fn before(year: i32, bounds: &YearBounds) -> Self {
        Self {
            first: bounds.earliest,
            last: year - 1,
        }
    }

    /// Years released strictly after `year`.
    pub fn after(year: i32, bounds: &YearBounds) -> Self {
        Self {
            first: year + 1,
            last: bounds.latest(),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.range().contains(&year)
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.first..=self.last
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Clue {
    /// Whether the answer shares the guess's value.
    Matches(bool),
    Years(YearWindow),
    Tags(SetRelation),
}

/// Per-attribute clues, in schema order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedbackPattern {
    clues: Vec<Clue>,
}

impl FeedbackPattern {
    pub fn derive(
        guess: &Entity,
        answer: &Entity,
        schema: &Schema,
        years: &YearBounds,
    ) -> Result<Self, EvaluationError> {
        let clues = schema
            .iter()
            .enumerate()
            .map(|(idx, attr)| -> Result<Clue, EvaluationError> {
                let malformed = |entity: &Entity| EvaluationError::MalformedRecord {
                    entity: entity.name().to_owned(),
                    attribute: attr.key.clone(),
                };
                let g = guess.value(idx).ok_or_else(|| malformed(guess))?;
                let a = answer.value(idx).ok_or_else(|| malformed(answer))?;

                match (attr.kind, g, a) {
                    (
                        AttributeKind::Categorical,
                        AttributeValue::Categorical(g),
                        AttributeValue::Categorical(a),
                    ) => Ok(Clue::Matches(a == g)),
                    (
                        AttributeKind::Ordinal,
                        &AttributeValue::Year(g),
                        &AttributeValue::Year(a),
                    ) => {
                        let window = if a == g {
                            YearWindow::exactly(g)
                        } else if a < g {
                            YearWindow::before(g, years)
                        } else {
                            YearWindow::after(g, years)
                        };
                        Ok(Clue::Years(window))
                    }
                    (AttributeKind::Set, AttributeValue::Tags(g), AttributeValue::Tags(a)) => {
                        Ok(Clue::Tags(SetRelation::classify(a, g)))
                    }
                    (kind, g, _) if g.kind() != kind => Err(malformed(guess)),
                    _ => Err(malformed(answer)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { clues })
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn clue(&self, idx: usize) -> Option<&Clue> {
        self.clues.get(idx)
    }
}
