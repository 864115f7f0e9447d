//! Keyword FAQ matcher — the deterministic retrieval path.
//!
//! No network calls: this is the fallback that must keep answering when
//! every external service is down.

use crate::data::{FAQS, FaqEntry};

/// Minimum score an entry must beat to be returned.
const ACCEPT_THRESHOLD: f32 = 30.0;
/// Lower weight for answer text — long answers pick up incidental overlap.
const ANSWER_WEIGHT: f32 = 0.5;

/// Score a query against one candidate text.
///
/// A substring match in either direction scores 100 — the query appearing
/// inside the candidate, or a short candidate (a keyword like "pto")
/// appearing whole inside the query. Otherwise the score is the fraction
/// of query words found in the candidate, scaled to 80.
fn score_text(query: &str, candidate: &str) -> f32 {
    let q = query.to_lowercase();
    let c = candidate.to_lowercase();

    if c.contains(&q) || (!c.is_empty() && q.contains(&c)) {
        return 100.0;
    }

    let words: Vec<&str> = q.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let matched = words.iter().filter(|w| c.contains(*w)).count();
    matched as f32 / words.len() as f32 * 80.0
}

/// Best score for a query against one entry: the max across its question,
/// each keyword, and the answer (at half weight).
fn score_entry(query: &str, entry: &FaqEntry) -> f32 {
    let question = score_text(query, entry.question);
    let keywords = entry
        .keywords
        .iter()
        .map(|k| score_text(query, k))
        .fold(0.0f32, f32::max);
    let answer = score_text(query, entry.answer) * ANSWER_WEIGHT;

    question.max(keywords).max(answer)
}

/// Guidance returned when nothing clears the threshold.
fn no_match_response(query: &str) -> String {
    format!(
        "I couldn't find a matching FAQ for \"{query}\". Try asking about:\n\
- Company mission and values\n\
- The Atlas product and its tech stack\n\
- Leave and time off policies\n\
- Expense reimbursement\n\
- Chat channels to join\n\
- Tools and access\n\
- First week guidance\n\
- Benefits\n\
Or ask your manager or in #ask-anything!"
    )
}

/// Answer a query from the FAQ table, or return structured guidance when
/// no entry scores above the acceptance threshold.
pub fn lookup(query: &str) -> String {
    if query.trim().is_empty() {
        return "Please ask a question! Try asking about policies, tools, Atlas, \
or how to get started."
            .to_string();
    }

    let mut best: Option<(&FaqEntry, f32)> = None;
    for entry in FAQS {
        let score = score_entry(query, entry);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((entry, score));
        }
    }

    match best {
        Some((entry, score)) if score > ACCEPT_THRESHOLD => {
            tracing::debug!("faq matched '{}' (score {:.0})", entry.id, score);
            entry.answer.to_string()
        }
        _ => no_match_response(query),
    }
}

/// All entries in a category.
pub fn entries_by_category(category: &str) -> Vec<&'static FaqEntry> {
    FAQS.iter().filter(|f| f.category == category).collect()
}
