//! Keyword salience in top performers
//!
//! Exploratory, not hypothesis-testing: tokenizes the titles of the
//! top-viewed slice of the catalog and reports the most frequent tokens
//! after stop-word and short-token filtering. Shares the table-consuming
//! contract of the other procedures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::AnalysisRecord;

/// Default share of the catalog treated as "top performers"
pub const DEFAULT_TOP_FRACTION: f64 = 0.1;

/// Default number of keywords reported
pub const DEFAULT_KEYWORD_LIMIT: usize = 15;

/// Tokens excluded from keyword counting
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "to", "for", "of", "and", "or", "is", "with", "from",
    "|", "vs", "by", "are", "be", "as", "it", "this", "that", "my", "your", "i", "you",
];

/// One keyword and its occurrence count across the sampled titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

/// Keyword frequency report over the top-viewed slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordReport {
    /// How many items made the top slice
    pub sampled_items: usize,
    /// Most frequent tokens, count-descending, ties in first-encountered order
    pub keywords: Vec<KeywordCount>,
}

/// Count title keywords over the top `top_fraction` of records by views.
///
/// Selection size is `floor(len * top_fraction)`; ranking ties keep the
/// original table order. Tokens are lower-cased words; stop words and tokens
/// of two characters or fewer are discarded.
pub fn top_keywords(
    table: &[AnalysisRecord],
    top_fraction: f64,
    limit: usize,
) -> KeywordReport {
    let take = ((table.len() as f64) * top_fraction) as usize;

    let mut order: Vec<usize> = (0..table.len()).collect();
    // stable sort: equal view counts keep original order
    order.sort_by(|&a, &b| table[b].views().cmp(&table[a].views()));
    order.truncate(take);

    let mut counts: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &i in &order {
        for token in tokenize(table[i].title()) {
            if let Some(&slot) = index.get(&token) {
                counts[slot].count += 1;
            } else {
                index.insert(token.clone(), counts.len());
                counts.push(KeywordCount { token, count: 1 });
            }
        }
    }

    // stable sort keeps first-encountered order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);

    KeywordReport {
        sampled_items: take,
        keywords: counts,
    }
}

fn tokenize(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() > 2 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}
