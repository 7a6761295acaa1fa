//! Content compiler: per-type author input -> normalized content + answer key.
//!
//! Compilation is pure and total: well-formed markers and sections become
//! answer-key entries, anything malformed stays literal text, and an input
//! with no recognizable answer points compiles to an empty key (such an
//! exercise always scores 0, which is expected rather than an error).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::markup;
use crate::types::{
    CategoryItem, CategoryPlacement, ExerciseBody, MatchingPair, OrderItem, Statement, TruthAnswer,
};

/// Raw authoring input, one variant per exercise type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthorInput {
    /// Free text with embedded-choice blocks.
    MultipleChoice { text: String },
    /// Checkbox question with options and checked indices.
    MultipleSelect {
        question: String,
        options: Vec<String>,
        correct: Vec<usize>,
    },
    /// Free text with blank markers plus `-<id>: answer` key lines.
    FillInBlanks { text: String, answers: String },
    /// Already-paired left/right entries.
    Matching { pairs: Vec<MatchingPair> },
    /// `id:Name` declarations plus a blob of `id(Text)` placements.
    Categorize { categories: String, items: String },
    /// One `t:`/`f:` statement per line.
    TrueFalse { statements: String },
    /// Items in correct order, `&&`-separated.
    Order { items: String },
    /// Rich-text blob with `tb:` answer tokens.
    Table { html: String },
    /// Text to scramble when no image is attached.
    Puzzle { text: String },
    /// Prompt for a manually graded answer.
    FreeText { prompt: String },
    /// `<id>. <word>;` bank entries plus text with matching blank markers.
    UseFromList { list: String, text: String },
}

/// Compile author input into the exercise's content and answer key.
pub fn compile(input: AuthorInput) -> ExerciseBody {
    match input {
        AuthorInput::MultipleChoice { text } => compile_multiple_choice(text),
        AuthorInput::MultipleSelect {
            question,
            options,
            correct,
        } => compile_multiple_select(question, options, correct),
        AuthorInput::FillInBlanks { text, answers } => compile_fill_in_blanks(text, answers),
        AuthorInput::Matching { pairs } => ExerciseBody::Matching { pairs },
        AuthorInput::Categorize { categories, items } => compile_categorize(categories, items),
        AuthorInput::TrueFalse { statements } => compile_true_false(statements),
        AuthorInput::Order { items } => compile_order(items),
        AuthorInput::Table { html } => compile_table(html),
        AuthorInput::Puzzle { text } => ExerciseBody::Puzzle {
            text: if text.is_empty() { None } else { Some(text) },
        },
        AuthorInput::FreeText { prompt } => ExerciseBody::FreeText { prompt },
        AuthorInput::UseFromList { list, text } => compile_use_from_list(list, text),
    }
}

fn compile_multiple_choice(text: String) -> ExerciseBody {
    let mut key = BTreeMap::new();
    for block in markup::choice_blocks(&text) {
        for option in block.options.iter().filter(|o| o.correct) {
            if key.insert(block.id, option.key.clone()).is_some() {
                tracing::warn!(
                    marker = block.id,
                    "marker id flagged correct more than once, keeping the last option"
                );
            }
        }
    }
    ExerciseBody::MultipleChoice { text, key }
}

fn compile_multiple_select(
    question: String,
    options: Vec<String>,
    correct: Vec<usize>,
) -> ExerciseBody {
    let options: Vec<String> = options
        .into_iter()
        .filter(|o| !o.trim().is_empty())
        .collect();
    let correct = correct
        .into_iter()
        .filter(|&idx| idx < options.len())
        .collect();
    ExerciseBody::MultipleSelect {
        question,
        options,
        correct,
    }
}

fn compile_fill_in_blanks(text: String, answers: String) -> ExerciseBody {
    let mut key = BTreeMap::new();
    for (id, value) in markup::answer_lines(&answers) {
        if key.insert(id, value).is_some() {
            tracing::warn!(marker = id, "duplicate answer line, keeping the last value");
        }
    }
    ExerciseBody::FillInBlanks { text, key }
}

fn compile_categorize(categories: String, items: String) -> ExerciseBody {
    let categories: BTreeMap<String, String> =
        markup::category_declarations(&categories).into_iter().collect();

    let items: Vec<CategoryItem> = markup::category_placements(&items)
        .into_iter()
        .enumerate()
        .map(|(n, (category_id, text))| CategoryItem {
            id: format!("item-{n}"),
            text,
            category_id,
        })
        .collect();

    let key = items
        .iter()
        .map(|item| CategoryPlacement {
            item_id: item.id.clone(),
            category_id: item.category_id.clone(),
        })
        .collect();

    ExerciseBody::Categorize {
        categories,
        items,
        key,
    }
}

fn compile_true_false(statements: String) -> ExerciseBody {
    // Ids derive from the raw line index, so skipped lines leave gaps.
    let statements: Vec<Statement> = statements
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let (is_true, text) = markup::truth_prefix(line)?;
            Some(Statement {
                id: format!("tf-{i}"),
                text: text.to_string(),
                is_true,
            })
        })
        .collect();

    let key = statements
        .iter()
        .map(|s| TruthAnswer {
            id: s.id.clone(),
            val: s.is_true,
        })
        .collect();

    ExerciseBody::TrueFalse { statements, key }
}

fn compile_order(items: String) -> ExerciseBody {
    let items: Vec<OrderItem> = markup::order_segments(&items)
        .into_iter()
        .enumerate()
        .map(|(n, text)| OrderItem {
            id: format!("ord-{n}"),
            text,
        })
        .collect();
    let key = items.iter().map(|i| i.id.clone()).collect();
    ExerciseBody::Order { items, key }
}

fn compile_table(html: String) -> ExerciseBody {
    tracing::debug!(
        slots = markup::table_slots(&html).len(),
        "compiled table exercise"
    );
    ExerciseBody::Table { html }
}

fn compile_use_from_list(list: String, text: String) -> ExerciseBody {
    let mut key = BTreeMap::new();
    let mut words = Vec::new();
    for (id, word) in markup::word_bank_entries(&list) {
        key.insert(id, word.clone());
        words.push(word);
    }
    ExerciseBody::UseFromList {
        text,
        list: words,
        key,
    }
}
