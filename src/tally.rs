use crate::models::{Record, TallyEntry};
use std::collections::HashMap;

/// Grouping key for an answer: case-folded and trimmed.
pub fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Counts answers by normalized text, most frequent first.
///
/// Each group displays the first spelling seen. Groups with equal counts
/// stay in the order they were first encountered.
pub fn tally(records: &[Record]) -> Vec<TallyEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<TallyEntry> = Vec::new();

    for record in records {
        let key = normalize(&record.answer);
        match index.get(&key) {
            Some(&slot) => entries[slot].count += 1,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push(TallyEntry {
                    key,
                    text: record.answer.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

pub fn max_count(entries: &[TallyEntry]) -> usize {
    entries.iter().map(|entry| entry.count).max().unwrap_or(0)
}
