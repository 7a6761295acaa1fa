//! Scoring engine: one algorithm per exercise type.
//!
//! Every path returns a definite integer 0..=100, rounded once at the end.
//! An empty denominator scores 0, and a missing learner entry counts as a
//! miss. The only error is a shape mismatch between exercise and answers.

use std::collections::{BTreeMap, HashSet};

use crate::error::ScoreError;
use crate::markup;
use crate::matching;
use crate::types::{
    AnswerSheet, CategoryItem, Exercise, ExerciseBody, MarkerId, MatchingPair, Statement,
    TruthAnswer, PUZZLE_TILES,
};

/// Result type alias for scoring operations.
pub type Result<T> = std::result::Result<T, ScoreError>;

/// Score a learner's answer sheet against a compiled exercise.
pub fn score(exercise: &Exercise, answers: &AnswerSheet) -> Result<u8> {
    score_body(&exercise.body, answers)
}

/// Score against the exercise body directly.
pub fn score_body(body: &ExerciseBody, answers: &AnswerSheet) -> Result<u8> {
    match (body, answers) {
        (ExerciseBody::MultipleChoice { key, .. }, AnswerSheet::MultipleChoice(given)) => {
            Ok(score_key_map(key, given, |expected, got| expected == got))
        }
        (ExerciseBody::MultipleSelect { correct, .. }, AnswerSheet::MultipleSelect(selected)) => {
            Ok(score_multiple_select(correct, selected))
        }
        (ExerciseBody::FillInBlanks { key, .. }, AnswerSheet::FillInBlanks(given)) => {
            Ok(score_key_map(key, given, |expected, got| {
                matching::matches_alternatives(expected, got)
            }))
        }
        (ExerciseBody::Matching { pairs }, AnswerSheet::Matching(connections)) => {
            Ok(score_matching(pairs, connections))
        }
        (ExerciseBody::Categorize { items, .. }, AnswerSheet::Categorize(assigned)) => {
            Ok(score_categorize(items, assigned))
        }
        (ExerciseBody::TrueFalse { statements, key }, AnswerSheet::TrueFalse(given)) => {
            Ok(score_true_false(statements, key, given))
        }
        (ExerciseBody::Order { key, .. }, AnswerSheet::Order(submitted)) => {
            Ok(if *key == *submitted { 100 } else { 0 })
        }
        (ExerciseBody::Table { html }, AnswerSheet::Table(filled)) => Ok(score_table(html, filled)),
        (ExerciseBody::Puzzle { .. }, AnswerSheet::Puzzle(tiles)) => Ok(score_puzzle(tiles)),
        (ExerciseBody::FreeText { .. }, AnswerSheet::FreeText(_)) => Ok(0),
        (ExerciseBody::UseFromList { key, .. }, AnswerSheet::UseFromList(given)) => {
            Ok(score_key_map(key, given, |expected, got| {
                matching::matches_exact(expected, got)
            }))
        }
        (body, sheet) => Err(ScoreError::AnswerShape {
            expected: body.exercise_type(),
            submitted: sheet.exercise_type(),
        }),
    }
}

/// Percentage of correct entries, rounded to the nearest integer.
fn ratio(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u8
}

/// Walk an answer key keyed by marker id; absent learner entries miss.
fn score_key_map(
    key: &BTreeMap<MarkerId, String>,
    given: &BTreeMap<MarkerId, String>,
    is_match: impl Fn(&str, &str) -> bool,
) -> u8 {
    let correct = key
        .iter()
        .filter(|(id, expected)| {
            given
                .get(*id)
                .is_some_and(|got| is_match(expected.as_str(), got.as_str()))
        })
        .count();
    ratio(correct, key.len())
}

/// Hits minus misses over the correct count, clamped to 0..=100.
fn score_multiple_select(correct: &[usize], selected: &[usize]) -> u8 {
    if correct.is_empty() {
        return 0;
    }
    let correct_set: HashSet<usize> = correct.iter().copied().collect();
    let mut hits = 0i64;
    let mut misses = 0i64;
    for idx in selected {
        if correct_set.contains(idx) {
            hits += 1;
        } else {
            misses += 1;
        }
    }
    let raw = (hits - misses) as f64 / correct.len() as f64;
    (raw * 100.0).round().clamp(0.0, 100.0) as u8
}

/// A pair is correctly connected iff the learner linked its left entry to
/// the right entry carrying the same id.
fn score_matching(pairs: &[MatchingPair], connections: &BTreeMap<String, String>) -> u8 {
    let correct = pairs
        .iter()
        .filter(|p| connections.get(&p.id) == Some(&p.id))
        .count();
    ratio(correct, pairs.len())
}

fn score_categorize(items: &[CategoryItem], assigned: &BTreeMap<String, String>) -> u8 {
    let correct = items
        .iter()
        .filter(|item| assigned.get(&item.id) == Some(&item.category_id))
        .count();
    ratio(correct, items.len())
}

fn score_true_false(
    statements: &[Statement],
    key: &[TruthAnswer],
    given: &BTreeMap<String, bool>,
) -> u8 {
    let correct = statements
        .iter()
        .filter(|s| {
            let expected = key.iter().find(|a| a.id == s.id).map(|a| a.val);
            given.get(&s.id).copied() == expected && expected.is_some()
        })
        .count();
    ratio(correct, statements.len())
}

/// Re-run the shared tokenizer over the stored blob; the learner's entries
/// are keyed by the same byte offsets the tokenizer reports.
fn score_table(html: &str, filled: &BTreeMap<usize, String>) -> u8 {
    let slots = markup::table_slots(html);
    let correct = slots
        .iter()
        .filter(|slot| {
            filled
                .get(&slot.offset)
                .is_some_and(|got| matching::matches_exact(&slot.expected, got))
        })
        .count();
    ratio(correct, slots.len())
}

/// Solved iff the tiles form the identity permutation of the 3x3 grid.
fn score_puzzle(tiles: &[usize]) -> u8 {
    if tiles.len() == PUZZLE_TILES && tiles.iter().enumerate().all(|(pos, &tile)| tile == pos) {
        100
    } else {
        0
    }
}
