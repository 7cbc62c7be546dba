//! Term frequency extraction from post text.

use std::collections::{HashMap, HashSet};

use postpulse_store::TermFrequencies;
use regex::Regex;

use crate::clean::Record;
use crate::stop_words::STOP_WORDS;

/// Number of terms kept in the published artifact.
pub const TOP_TERM_COUNT: usize = 50;

/// Most frequent terms across all post text, capped at `limit`.
///
/// Ties order by first appearance in the corpus, which keeps results
/// deterministic for identical inputs.
#[must_use]
pub fn most_common_terms(records: &[Record], limit: usize) -> TermFrequencies {
    let corpus = records
        .iter()
        .map(|record| record.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mut counts = count_terms(&tokenize(&corpus));
    counts.truncate(limit);
    counts
}

/// Split raw post text into candidate terms.
///
/// URLs, mentions, hashtags, digit runs, and punctuation are stripped
/// before lowercasing. Single-character tokens and stop words are
/// dropped.
fn tokenize(text: &str) -> Vec<String> {
    let url = Regex::new(r"http\S+|www\S+").expect("valid regex");
    let mention = Regex::new(r"@\w+").expect("valid regex");
    let hashtag = Regex::new(r"#\w+").expect("valid regex");
    let digits = Regex::new(r"\d+").expect("valid regex");
    let punctuation = Regex::new(r"[^\w\s]").expect("valid regex");

    let text = url.replace_all(text, "");
    let text = mention.replace_all(&text, "");
    let text = hashtag.replace_all(&text, "");
    let text = digits.replace_all(&text, "");
    let text = punctuation.replace_all(&text, "");
    let text = text.to_lowercase();

    let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    text.split_whitespace()
        .filter(|token| token.chars().count() > 1 && !stop_words.contains(token))
        .map(ToString::to_string)
        .collect()
}

/// Count tokens and order by descending frequency. Rust's stable sort
/// preserves first-appearance order between equal counts.
fn count_terms(tokens: &[String]) -> TermFrequencies {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: TermFrequencies = Vec::new();
    for token in tokens {
        if let Some(&at) = positions.get(token.as_str()) {
            counts[at].1 += 1;
        } else {
            positions.insert(token.as_str(), counts.len());
            counts.push((token.clone(), 1));
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
