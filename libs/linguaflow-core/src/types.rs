//! Core types for the LinguaFlow exercise model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifier of a numbered answer point inside authored text.
pub type MarkerId = u32;

/// Tile count of the fixed 3x3 puzzle grid.
pub const PUZZLE_TILES: usize = 9;

/// The eleven supported exercise types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    MultipleChoice,
    MultipleSelect,
    FillInBlanks,
    Matching,
    Categorize,
    TrueFalse,
    Order,
    Table,
    Puzzle,
    FreeText,
    UseFromList,
}

impl ExerciseType {
    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::MultipleSelect => "multiple_select",
            Self::FillInBlanks => "fill_in_blanks",
            Self::Matching => "matching",
            Self::Categorize => "categorize",
            Self::TrueFalse => "true_false",
            Self::Order => "order",
            Self::Table => "table",
            Self::Puzzle => "puzzle",
            Self::FreeText => "free_text",
            Self::UseFromList => "use_from_list",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One left/right pair of a matching exercise. The correct connection for a
/// pair is the right-hand entry carrying the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    pub id: String,
    pub left: String,
    pub right: String,
}

/// An item to be sorted into a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    pub text: String,
    pub category_id: String,
}

/// Authored placement of one item into one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPlacement {
    pub item_id: String,
    pub category_id: String,
}

/// A single true/false statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    pub text: String,
    pub is_true: bool,
}

/// Expected truth value for one statement, mirroring its `is_true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthAnswer {
    pub id: String,
    pub val: bool,
}

/// An item of an ordering exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub text: String,
}

/// Compiled exercise payload: the normalized content and answer key for one
/// exercise type, generated together by a single compilation pass.
///
/// Only the content compiler produces values of this type; hand-constructing
/// a variant risks a key that no longer matches the rendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseBody {
    /// Free text with embedded-choice blocks; `key` maps marker id to the
    /// option key flagged correct.
    MultipleChoice {
        text: String,
        key: BTreeMap<MarkerId, String>,
    },
    /// Checkbox question; `correct` holds the indices of correct options.
    MultipleSelect {
        question: String,
        options: Vec<String>,
        correct: Vec<usize>,
    },
    /// Free text with blank markers; key values keep the raw `::`-joined
    /// alternative list.
    FillInBlanks {
        text: String,
        key: BTreeMap<MarkerId, String>,
    },
    /// Connect-the-pairs; scored structurally by self-id equality.
    Matching { pairs: Vec<MatchingPair> },
    /// Category buckets plus items; `key` restates each item's authored
    /// category (derivable from `items`, stored alongside them).
    Categorize {
        categories: BTreeMap<String, String>,
        items: Vec<CategoryItem>,
        key: Vec<CategoryPlacement>,
    },
    /// Statements with authored truth values; `key` mirrors them.
    TrueFalse {
        statements: Vec<Statement>,
        key: Vec<TruthAnswer>,
    },
    /// Items stored in the authored (correct) order; `key` is that id
    /// sequence.
    Order {
        items: Vec<OrderItem>,
        key: Vec<String>,
    },
    /// Rich-text blob containing `tb:` answer tokens; scored by re-running
    /// the shared tokenizer over `html`.
    Table { html: String },
    /// 3x3 tile puzzle over text or an attached image; solved iff the tile
    /// order is the identity permutation.
    Puzzle { text: Option<String> },
    /// Prompt for a manually graded answer.
    FreeText { prompt: String },
    /// Free text with blank markers plus a word bank; `list` keeps authored
    /// order, shuffling is a presentation concern.
    UseFromList {
        text: String,
        list: Vec<String>,
        key: BTreeMap<MarkerId, String>,
    },
}

impl ExerciseBody {
    /// The exercise type tag of this payload.
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Self::MultipleChoice { .. } => ExerciseType::MultipleChoice,
            Self::MultipleSelect { .. } => ExerciseType::MultipleSelect,
            Self::FillInBlanks { .. } => ExerciseType::FillInBlanks,
            Self::Matching { .. } => ExerciseType::Matching,
            Self::Categorize { .. } => ExerciseType::Categorize,
            Self::TrueFalse { .. } => ExerciseType::TrueFalse,
            Self::Order { .. } => ExerciseType::Order,
            Self::Table { .. } => ExerciseType::Table,
            Self::Puzzle { .. } => ExerciseType::Puzzle,
            Self::FreeText { .. } => ExerciseType::FreeText,
            Self::UseFromList { .. } => ExerciseType::UseFromList,
        }
    }
}

/// Media attachment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// Where a media attachment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    Upload,
    Url,
}

/// Opaque media reference attached to an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    pub url: String,
    pub source: MediaSource,
}

/// One authored unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub body: ExerciseBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaAttachment>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
}

impl Exercise {
    /// Create a new exercise around a compiled body.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        body: ExerciseBody,
        media: Option<MediaAttachment>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            body,
            media,
            created_at: Utc::now(),
            archived: false,
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.body.exercise_type()
    }
}

/// A learner's answers, shaped to mirror the exercise's interaction model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "answers", rename_all = "snake_case")]
pub enum AnswerSheet {
    /// Marker id -> chosen option key.
    MultipleChoice(BTreeMap<MarkerId, String>),
    /// Selected option indices.
    MultipleSelect(Vec<usize>),
    /// Marker id -> typed text.
    FillInBlanks(BTreeMap<MarkerId, String>),
    /// Left pair id -> connected right pair id.
    Matching(BTreeMap<String, String>),
    /// Item id -> assigned category id.
    Categorize(BTreeMap<String, String>),
    /// Statement id -> chosen truth value.
    TrueFalse(BTreeMap<String, bool>),
    /// Item ids in the learner's order.
    Order(Vec<String>),
    /// Cell byte offset -> typed text.
    Table(BTreeMap<usize, String>),
    /// Tile index at each grid position.
    Puzzle(Vec<usize>),
    /// The learner's free-form answer.
    FreeText(String),
    /// Marker id -> word taken from the bank.
    UseFromList(BTreeMap<MarkerId, String>),
}

impl AnswerSheet {
    /// The exercise type this sheet is shaped for.
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            Self::MultipleChoice(_) => ExerciseType::MultipleChoice,
            Self::MultipleSelect(_) => ExerciseType::MultipleSelect,
            Self::FillInBlanks(_) => ExerciseType::FillInBlanks,
            Self::Matching(_) => ExerciseType::Matching,
            Self::Categorize(_) => ExerciseType::Categorize,
            Self::TrueFalse(_) => ExerciseType::TrueFalse,
            Self::Order(_) => ExerciseType::Order,
            Self::Table(_) => ExerciseType::Table,
            Self::Puzzle(_) => ExerciseType::Puzzle,
            Self::FreeText(_) => ExerciseType::FreeText,
            Self::UseFromList(_) => ExerciseType::UseFromList,
        }
    }
}

/// Grading state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Scored automatically at submission time.
    Graded,
    /// Awaiting manual review (free-text only).
    Pending,
}

/// One learner's attempt against one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub exercise_id: String,
    pub learner_id: String,
    pub learner_name: String,
    pub exercise_title: String,
    pub answers: AnswerSheet,
    /// Percentage 0-100.
    pub score: u8,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exercise_type_names() {
        assert_eq!(ExerciseType::MultipleChoice.to_string(), "multiple_choice");
        assert_eq!(ExerciseType::UseFromList.to_string(), "use_from_list");
        assert_eq!(
            serde_json::to_value(ExerciseType::TrueFalse).unwrap(),
            serde_json::json!("true_false")
        );
    }

    #[test]
    fn body_reports_its_type() {
        let body = ExerciseBody::Order {
            items: vec![OrderItem {
                id: "ord-0".into(),
                text: "first".into(),
            }],
            key: vec!["ord-0".into()],
        };
        assert_eq!(body.exercise_type(), ExerciseType::Order);

        let sheet = AnswerSheet::Order(vec!["ord-0".into()]);
        assert_eq!(sheet.exercise_type(), ExerciseType::Order);
    }

    #[test]
    fn body_serde_is_tagged_by_type() {
        let body = ExerciseBody::FillInBlanks {
            text: "The -1- is red.".into(),
            key: BTreeMap::from([(1, "sky::heaven".into())]),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "fill_in_blanks");
        assert_eq!(json["key"]["1"], "sky::heaven");

        let back: ExerciseBody = serde_json::from_value(json).unwrap();
        assert_eq!(back, body);
    }

    #[test]
    fn exercise_serde_roundtrip() {
        let exercise = Exercise::new(
            "Colors",
            "Fill in the colors",
            ExerciseBody::FreeText {
                prompt: "Describe the sky.".into(),
            },
            Some(MediaAttachment {
                kind: MediaKind::Image,
                url: "https://example.com/sky.png".into(),
                source: MediaSource::Url,
            }),
        );
        let json = serde_json::to_string(&exercise).unwrap();
        let back: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exercise);
        assert_eq!(back.exercise_type(), ExerciseType::FreeText);
    }

    #[test]
    fn answer_sheet_serde_roundtrip() {
        let sheet = AnswerSheet::Table(BTreeMap::from([(42, "cat".to_string())]));
        let json = serde_json::to_string(&sheet).unwrap();
        let back: AnswerSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet);
    }
}
