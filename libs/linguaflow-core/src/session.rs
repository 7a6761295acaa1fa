//! Submit and manual-review flows over the record stores.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SessionError, StoreError};
use crate::scoring;
use crate::store::{ExerciseStore, SubmissionStore};
use crate::types::{AnswerSheet, ExerciseType, Submission, SubmissionStatus};

/// One learner's completed attempt, ready to grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub learner_id: String,
    pub learner_name: String,
    pub answers: AnswerSheet,
}

/// A reviewer's manual override of a graded or pending submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub score: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Grade an attempt against a stored exercise and persist the submission.
///
/// Free-text answers are stored pending with score 0; every other type is
/// graded on the spot. Archived exercises no longer accept submissions.
pub fn submit_exercise(
    exercises: &dyn ExerciseStore,
    submissions: &dyn SubmissionStore,
    exercise_id: &str,
    request: SubmitRequest,
) -> Result<Submission, SessionError> {
    let exercise = exercises
        .get(exercise_id)?
        .ok_or_else(|| StoreError::ExerciseNotFound(exercise_id.to_string()))?;
    if exercise.archived {
        return Err(SessionError::ExerciseArchived(exercise_id.to_string()));
    }

    let score = scoring::score(&exercise, &request.answers)?;
    let status = if exercise.exercise_type() == ExerciseType::FreeText {
        SubmissionStatus::Pending
    } else {
        SubmissionStatus::Graded
    };
    tracing::debug!(exercise = %exercise.id, score, "graded submission");

    let submission = Submission {
        id: Uuid::new_v4().to_string(),
        exercise_id: exercise.id,
        learner_id: request.learner_id,
        learner_name: request.learner_name,
        exercise_title: exercise.title,
        answers: request.answers,
        score,
        status,
        reviewer_comment: None,
        submitted_at: Utc::now(),
    };
    submissions.create(submission.clone())?;
    Ok(submission)
}

/// Apply a reviewer's override to a stored submission.
pub fn review_submission(
    submissions: &dyn SubmissionStore,
    submission_id: &str,
    update: ReviewUpdate,
) -> Result<Submission, SessionError> {
    let score = update.score.min(100);
    Ok(submissions.apply_review(submission_id, score, update.comment)?)
}
