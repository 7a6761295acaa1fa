//! Record stores for exercises and submissions.
//!
//! The stores are injected collaborators with an explicit CRUD surface;
//! nothing in the crate reaches for an ambient singleton. Persistence
//! backends live outside this crate; [`InMemoryStore`] backs tests and
//! embedders that keep records in process.

use std::sync::Mutex;

use crate::error::StoreError;
use crate::types::{Exercise, Submission, SubmissionStatus};

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// CRUD surface for authored exercises.
pub trait ExerciseStore {
    /// Persist a new exercise. Fails on a duplicate id.
    fn create(&self, exercise: Exercise) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<Exercise>>;
    /// All exercises, newest first.
    fn list(&self) -> Result<Vec<Exercise>>;
    /// Replace an existing exercise wholesale.
    fn update(&self, exercise: Exercise) -> Result<()>;
    fn set_archived(&self, id: &str, archived: bool) -> Result<()>;
    /// Remove an exercise and every submission made against it.
    fn delete(&self, id: &str) -> Result<()>;
}

/// CRUD surface for learner submissions.
pub trait SubmissionStore {
    /// Persist a new submission. Fails on a duplicate id.
    fn create(&self, submission: Submission) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<Submission>>;
    /// All submissions, newest first.
    fn list(&self) -> Result<Vec<Submission>>;
    fn list_for_learner(&self, learner_id: &str) -> Result<Vec<Submission>>;
    /// Manual review override: set the score, mark the submission graded,
    /// and attach the reviewer's comment.
    fn apply_review(&self, id: &str, score: u8, comment: Option<String>) -> Result<Submission>;
}

#[derive(Debug, Default)]
struct Records {
    exercises: Vec<Exercise>,
    submissions: Vec<Submission>,
}

/// In-process store backing tests and single-process embedders.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExerciseStore for InMemoryStore {
    fn create(&self, exercise: Exercise) -> Result<()> {
        let mut records = self.records.lock().expect("store lock");
        if records.exercises.iter().any(|e| e.id == exercise.id) {
            return Err(StoreError::DuplicateId(exercise.id));
        }
        records.exercises.insert(0, exercise);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Exercise>> {
        let records = self.records.lock().expect("store lock");
        Ok(records.exercises.iter().find(|e| e.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Exercise>> {
        let records = self.records.lock().expect("store lock");
        Ok(records.exercises.clone())
    }

    fn update(&self, exercise: Exercise) -> Result<()> {
        let mut records = self.records.lock().expect("store lock");
        match records.exercises.iter_mut().find(|e| e.id == exercise.id) {
            Some(slot) => {
                *slot = exercise;
                Ok(())
            }
            None => Err(StoreError::ExerciseNotFound(exercise.id)),
        }
    }

    fn set_archived(&self, id: &str, archived: bool) -> Result<()> {
        let mut records = self.records.lock().expect("store lock");
        match records.exercises.iter_mut().find(|e| e.id == id) {
            Some(exercise) => {
                exercise.archived = archived;
                Ok(())
            }
            None => Err(StoreError::ExerciseNotFound(id.to_string())),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.lock().expect("store lock");
        let before = records.exercises.len();
        records.exercises.retain(|e| e.id != id);
        if records.exercises.len() == before {
            return Err(StoreError::ExerciseNotFound(id.to_string()));
        }
        records.submissions.retain(|s| s.exercise_id != id);
        Ok(())
    }
}

impl SubmissionStore for InMemoryStore {
    fn create(&self, submission: Submission) -> Result<()> {
        let mut records = self.records.lock().expect("store lock");
        if records.submissions.iter().any(|s| s.id == submission.id) {
            return Err(StoreError::DuplicateId(submission.id));
        }
        records.submissions.insert(0, submission);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Submission>> {
        let records = self.records.lock().expect("store lock");
        Ok(records.submissions.iter().find(|s| s.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Submission>> {
        let records = self.records.lock().expect("store lock");
        Ok(records.submissions.clone())
    }

    fn list_for_learner(&self, learner_id: &str) -> Result<Vec<Submission>> {
        let records = self.records.lock().expect("store lock");
        Ok(records
            .submissions
            .iter()
            .filter(|s| s.learner_id == learner_id)
            .cloned()
            .collect())
    }

    fn apply_review(&self, id: &str, score: u8, comment: Option<String>) -> Result<Submission> {
        let mut records = self.records.lock().expect("store lock");
        match records.submissions.iter_mut().find(|s| s.id == id) {
            Some(submission) => {
                submission.score = score;
                submission.status = SubmissionStatus::Graded;
                submission.reviewer_comment = comment;
                Ok(submission.clone())
            }
            None => Err(StoreError::SubmissionNotFound(id.to_string())),
        }
    }
}
