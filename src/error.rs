//! Error types for the dotadle evaluator.
//!
//! Loading problems surface as [`RosterError`], integrity failures found while
//! evaluating as [`EvaluationError`]. Neither is recoverable: both mean the
//! roster handed to the evaluator is not one it can score.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config file {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("roster is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("roster must be a JSON array of entity objects")]
    NotAnArray,

    #[error("roster entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("roster entry {index} has no string `{key}`")]
    MissingName { index: usize, key: String },

    #[error("entity {entity:?}: attribute `{attribute}` is missing")]
    MissingAttribute { entity: String, attribute: String },

    #[error("entity {entity:?}: attribute `{attribute}` must be {expected}")]
    MistypedAttribute {
        entity: String,
        attribute: String,
        expected: &'static str,
    },

    #[error("entity name {0:?} appears more than once")]
    DuplicateName(String),

    #[error("roster needs at least two entities, found {0}")]
    TooSmall(usize),

    #[error("entity {entity:?}: release year {year} is outside {earliest}..{latest_exclusive}")]
    YearOutOfBounds {
        entity: String,
        year: i32,
        earliest: i32,
        latest_exclusive: i32,
    },
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("entity {entity:?}: attribute `{attribute}` does not match the schema")]
    MalformedRecord { entity: String, attribute: String },

    #[error("guess {guess:?} leaves no plausible entity for answer {answer:?}")]
    EmptyPool { guess: String, answer: String },

    #[error("guess {0:?} has no answers to evaluate")]
    NoAnswers(String),
}
