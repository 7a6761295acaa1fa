//! Markup grammar: the inline and auxiliary authoring syntaxes.
//!
//! # Inline forms
//! ```text
//! The -1- is red.                       blank marker
//! I -1-(a:go; b+:went; c:gone) home.    embedded-choice block
//! ```
//!
//! # Auxiliary forms
//! ```text
//! -1: sky::heaven                       fill-blank answer line
//! c1:Fruit, c2:Vegetable               category declarations
//! c1(Apple) c2(Carrot)                 category placements
//! t:Water is wet                        true/false statement line
//! First && Second && Third              order items
//! A tb:cat sat.                         table answer token
//! 1. went; 2. gone;                     word-bank entries
//! ```
//!
//! Everything that fails to match is literal text: extraction skips it and
//! never errors.

use regex::Regex;

use crate::types::MarkerId;

/// One option of an embedded-choice block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub key: String,
    /// Whether the author flagged this option with `+`.
    pub correct: bool,
    pub label: String,
}

/// One embedded-choice block: `-<id>-(<key>[+]:<label>; ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceBlock {
    pub id: MarkerId,
    pub options: Vec<ChoiceOption>,
}

/// One fillable cell of a table exercise, addressed by the byte offset of
/// its `tb:` token within the html blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSlot {
    pub offset: usize,
    pub expected: String,
}

/// Extract embedded-choice blocks from free text, in order of appearance.
pub fn choice_blocks(text: &str) -> Vec<ChoiceBlock> {
    let block_re = Regex::new(r"-(\d+)-\((.*?)\)").unwrap();
    let option_re = Regex::new(r"^\s*([a-z0-9]+)(\+?):(.*)").unwrap();

    block_re
        .captures_iter(text)
        .filter_map(|cap| {
            let id: MarkerId = cap[1].parse().ok()?;
            let options = cap[2]
                .split(';')
                .filter_map(|raw| {
                    let opt = option_re.captures(raw)?;
                    Some(ChoiceOption {
                        key: opt[1].to_string(),
                        correct: &opt[2] == "+",
                        label: opt[3].trim().to_string(),
                    })
                })
                .collect();
            Some(ChoiceBlock { id, options })
        })
        .collect()
}

/// Extract bare blank-marker ids (`-<id>-`) in order of appearance.
/// Duplicates are kept; callers decide how to treat them.
pub fn blank_ids(text: &str) -> Vec<MarkerId> {
    let re = Regex::new(r"-(\d+)-").unwrap();
    re.captures_iter(text)
        .filter_map(|cap| cap[1].parse().ok())
        .collect()
}

/// Extract `-<id>: <answer>` key lines from a fill-blank answer blob,
/// one per line, in line order.
pub fn answer_lines(raw: &str) -> Vec<(MarkerId, String)> {
    let re = Regex::new(r"-(\d+):\s*(.+)").unwrap();
    raw.lines()
        .filter_map(|line| {
            let cap = re.captures(line)?;
            Some((cap[1].parse().ok()?, cap[2].trim().to_string()))
        })
        .collect()
}

/// Parse `id:Name, id:Name, ...` category declarations. Segments missing
/// either part are skipped.
pub fn category_declarations(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .filter_map(|segment| {
            let mut parts = segment.split(':');
            let id = parts.next()?.trim();
            let name = parts.next()?.trim();
            if id.is_empty() || name.is_empty() {
                return None;
            }
            Some((id.to_string(), name.to_string()))
        })
        .collect()
}

/// Extract `c<digits>(Text)` item placements in order of appearance.
pub fn category_placements(raw: &str) -> Vec<(String, String)> {
    let re = Regex::new(r"(c\d+)\((.*?)\)").unwrap();
    re.captures_iter(raw)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
        .collect()
}

/// Classify one true/false statement line. Returns the authored truth value
/// and the statement text; lines without a `t:`/`f:` prefix are `None`.
pub fn truth_prefix(line: &str) -> Option<(bool, &str)> {
    if let Some(rest) = line.strip_prefix("t:") {
        Some((true, rest))
    } else {
        line.strip_prefix("f:").map(|rest| (false, rest))
    }
}

/// Split an order blob on the literal `&&` delimiter. Segments are trimmed
/// but otherwise kept as authored, including empty ones.
pub fn order_segments(raw: &str) -> Vec<String> {
    raw.split("&&").map(|s| s.trim().to_string()).collect()
}

/// Scan a table html blob for `tb:<expected>` tokens.
///
/// The expected text runs to the first tag boundary `<`, whitespace, or
/// literal `&nbsp;`; a trailing token with no such delimiter is literal
/// text. This is the one tokenizer used both when compiling and when
/// scoring, so cell addresses cannot drift between the two.
pub fn table_slots(html: &str) -> Vec<TableSlot> {
    let re = Regex::new(r"tb:(.+?)(?:<|\s|&nbsp;)").unwrap();
    re.captures_iter(html)
        .map(|cap| TableSlot {
            offset: cap.get(0).expect("whole match").start(),
            expected: cap[1].to_string(),
        })
        .collect()
}

/// Parse `<id>. <word>` entries from a semicolon-separated word-bank blob.
pub fn word_bank_entries(raw: &str) -> Vec<(MarkerId, String)> {
    let re = Regex::new(r"^(\d+)\.\s*(.+)").unwrap();
    raw.split(';')
        .filter_map(|segment| {
            let cap = re.captures(segment.trim())?;
            Some((cap[1].parse().ok()?, cap[2].trim().to_string()))
        })
        .collect()
}
