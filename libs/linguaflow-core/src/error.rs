//! Error types for linguaflow-core.

use crate::types::ExerciseType;
use thiserror::Error;

/// Errors from the scoring engine.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The answer sheet is shaped for a different exercise type than the
    /// exercise being scored. There is no sane partial score to assign, so
    /// this integration mistake is signalled instead of guessed around.
    #[error("answer sheet shaped for {submitted} cannot score a {expected} exercise")]
    AnswerShape {
        expected: ExerciseType,
        submitted: ExerciseType,
    },
}

/// Errors from the record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("exercise not found: {0}")]
    ExerciseNotFound(String),

    #[error("submission not found: {0}")]
    SubmissionNotFound(String),

    #[error("record already exists: {0}")]
    DuplicateId(String),
}

/// Errors from the submit/review flows.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("exercise is archived: {0}")]
    ExerciseArchived(String),
}
