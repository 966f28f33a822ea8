//! Scores dotadle guesses by how far they narrow down the hidden hero.
//!
//! For every hero used as a guess and every other hero taken as the hidden
//! answer, [`FeedbackPattern`] derives what the game would report, the filter
//! keeps the heroes that would have produced the same report, and
//! [`GuessStatistics`] summarises those pools.

pub mod config;
pub mod entity;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod present;
pub mod schema;
pub mod simulate;
pub mod stats;

pub use config::{DisjointRule, SimulationConfig, YearBounds};
pub use entity::{AttributeValue, Entity, Roster};
pub use error::{Error, EvaluationError, Result, RosterError};
pub use feedback::{Clue, FeedbackPattern, SetRelation, YearWindow};
pub use filter::{plausible_pool, PlausibilityFilter};
pub use present::{present, OutputFormat};
pub use schema::{AttributeDescriptor, AttributeKind, Schema};
pub use simulate::{GuessReport, Simulator};
pub use stats::{
    answers_by_pool_size, rank_hardest, AnswerDifficulty, GuessStatistics, PlausiblePool,
};
