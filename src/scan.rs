//! Text scoring against a phrase-to-weight table.
//!
//! This module backs the `spam_detector` binary. A score list is a plain
//! text file with one `phrase,score` pair per line; [`parse_score_list`]
//! loads it into a [`HashMap`], and [`score_text`] sums, for every phrase,
//! `occurrences * score` over a lowercased message. Matches are counted at
//! every position, so occurrences may overlap: `"aa"` appears twice in
//! `"aaa"`.

use std::fmt::Display;
use std::io;
use std::io::BufRead;

use crate::HashMap;

/// The outcome of scoring a message against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Spam,
    NotSpam,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Spam => f.write_str("SPAM"),
            Verdict::NotSpam => f.write_str("NOT_SPAM"),
        }
    }
}

/// An error produced while loading a score list.
#[derive(Debug)]
pub enum ScanError {
    /// A line did not have the `phrase,score` shape, or its score was not
    /// an integer.
    Malformed { line: String },
    /// The underlying reader failed.
    Io(io::Error),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Malformed { line } => {
                write!(f, "malformed score list line: {line:?}")
            }
            ScanError::Io(err) => write!(f, "failed to read score list: {err}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Malformed { .. } => None,
            ScanError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ScanError {
    fn from(err: io::Error) -> Self {
        ScanError::Io(err)
    }
}

/// Parses a score list from a reader into a phrase-to-score map.
///
/// Each line must be `phrase,score`. The line is split at the *first*
/// comma, so phrases may not contain commas but are otherwise arbitrary;
/// the score must parse as an `i64`. Phrases are stored verbatim: two
/// phrases differing only in case are distinct entries, and each scores
/// independently during [`score_text`] (which lowercases both sides).
/// Duplicate phrases keep the first score listed.
///
/// # Examples
///
/// ```rust
/// use chain_hash::scan::parse_score_list;
///
/// let map = parse_score_list("free,5\nwinner,3\n".as_bytes()).unwrap();
/// assert_eq!(map.get("free"), Some(&5));
/// assert_eq!(map.len(), 2);
/// ```
pub fn parse_score_list(reader: impl BufRead) -> Result<HashMap<String, i64>, ScanError> {
    let mut scores = HashMap::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let Some((phrase, score)) = line.split_once(',') else {
            return Err(ScanError::Malformed { line });
        };
        let Ok(score) = score.parse::<i64>() else {
            return Err(ScanError::Malformed { line });
        };
        scores.insert(phrase.to_string(), score);
    }
    Ok(scores)
}

/// Counts the occurrences of `needle` in `haystack`, including overlapping
/// ones: the search resumes one character past each match start. The step
/// must be a whole character, not a byte, so multibyte matches never leave
/// the resume offset inside a codepoint.
fn count_overlapping(haystack: &str, needle: &str) -> i64 {
    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        count += 1;
        let match_start = start + pos;
        start = match_start
            + haystack[match_start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    count
}

/// Scores a message against a phrase-to-score map.
///
/// Both the message and each phrase are lowercased before matching, and
/// every phrase in the map is counted with overlap, each occurrence
/// contributing the phrase's score. Scores may be negative; the total is
/// the signed sum.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashMap;
/// use chain_hash::scan::score_text;
///
/// let mut scores: HashMap<String, i64> = HashMap::new();
/// scores.insert("free".to_string(), 5);
/// assert_eq!(score_text("You are FREE now, free at last", &scores), 10);
/// ```
pub fn score_text(text: &str, scores: &HashMap<String, i64>) -> i64 {
    let text = text.to_lowercase();
    let mut total = 0;
    for (phrase, score) in scores.iter() {
        // An empty phrase matches at every position; skip it rather than
        // charging `len + 1` times its score.
        if phrase.is_empty() {
            continue;
        }
        total += count_overlapping(&text, &phrase.to_lowercase()) * score;
    }
    total
}

/// Classifies a total score against a threshold.
///
/// A message is spam when its score reaches the threshold.
pub fn classify(score: i64, threshold: u32) -> Verdict {
    if score >= i64::from(threshold) {
        Verdict::Spam
    } else {
        Verdict::NotSpam
    }
}
