//! Core library for LinguaFlow interactive language-learning exercises.
//!
//! Provides:
//! - Markup grammar for embedding answer points inside authored text
//! - Content compiler turning author input into typed content + answer keys
//! - Scoring engine computing deterministic 0-100 scores per exercise type
//! - Record store traits with an in-memory implementation
//! - Submit/review flows tying the pieces together

pub mod compiler;
pub mod error;
pub mod markup;
pub mod matching;
pub mod scoring;
pub mod session;
pub mod store;
pub mod types;

pub use compiler::{compile, AuthorInput};
pub use error::{ScoreError, SessionError, StoreError};
pub use scoring::{score, score_body};
pub use session::{review_submission, submit_exercise, ReviewUpdate, SubmitRequest};
pub use store::{ExerciseStore, InMemoryStore, SubmissionStore};
pub use types::{
    AnswerSheet, CategoryItem, CategoryPlacement, Exercise, ExerciseBody, ExerciseType, MarkerId,
    MatchingPair, MediaAttachment, MediaKind, MediaSource, OrderItem, Statement, Submission,
    SubmissionStatus, TruthAnswer,
};
