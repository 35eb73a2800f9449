//! Insertion-ordered frequency counting.
//!
//! Every "top N" ranking in the artifacts breaks count ties by
//! first-encountered order, so repeated runs over the same snapshot
//! produce byte-identical output. A plain `HashMap` would leak its
//! iteration order into the ranking.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    count: usize,
    first_seen: usize,
}

/// Frequency counter whose rankings are stable across runs.
#[derive(Debug, Default)]
pub struct Tally {
    entries: HashMap<String, Entry>,
    next_seq: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: &str, n: usize) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.count += n;
        } else {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.entries.insert(
                key.to_string(),
                Entry {
                    count: n,
                    first_seen: seq,
                },
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Top `n` keys by descending count, ties broken by first-seen order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(&String, &Entry)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(key, entry)| (key.clone(), entry.count))
            .collect()
    }
}
