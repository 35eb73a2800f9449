//! Noise filtering for free-text keywords and organization entities.
//!
//! Upstream keyword/entity extraction produces boilerplate ("read
//! more"), lone stopwords, and publisher self-references ("Daily
//! Mirror") that would corrupt every ranking downstream. The filter is
//! the single shared gate; callers skip a dropped token, never
//! substitute a default.
//!
//! Blacklists are immutable configuration injected at construction so
//! tests and deployments can substitute their own lists.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;

/// Phrases that never make sense as topics or sector keywords.
const DEFAULT_STOP_TOPICS: &[&str] = &[
    "marketing manager  sales",
    "marketing manager sales",
    "this website",
    "the morning",
    "the sunday times",
    "sport",
    "what",
    "part",
    "who",
    ".",
    "ceo",
    "news",
    "home",
    "share",
    "login",
    "sign up",
    "read more",
    "click here",
    "advertisement",
    "breaking news",
];

/// Fragments identifying news publishers and media brands, matched by
/// containment against the lower-cased organization string.
const DEFAULT_PUBLISHER_FRAGMENTS: &[&str] = &[
    "times",
    "mirror",
    "news",
    "newspapers",
    "sunday",
    "daily",
    "lmd",
    "ft.lk",
    "ft.",
    "dailymirror",
    "sundaytimes",
    "the morning",
    "morningweb",
    "wnl",
    "publishers",
    "print ads",
    "advertising",
    ".lk",
];

/// Garbage shapes that survive the blacklist: comment-count artifacts,
/// browser/UI boilerplate, and strings with no letters at all.
const GARBAGE_PATTERNS: &[&str] = &[
    r"^\d+\s*(repl(?:y|ies)|comments?|views?|shares?|likes?)$",
    r"(?i)(click here|read more|sign ?up|log ?in|subscribe|cookies?|javascript|all rights reserved)",
    r"^[\d\s.,:;%/()+-]+$",
];

const DEFAULT_MIN_TOPIC_LEN: usize = 5;

#[derive(Debug, Clone)]
pub struct NoiseFilterConfig {
    /// Minimum topic length in characters; loosenable per deployment.
    pub min_topic_len: usize,
    pub stop_topics: Vec<String>,
    pub publisher_fragments: Vec<String>,
}

impl Default for NoiseFilterConfig {
    fn default() -> Self {
        Self {
            min_topic_len: DEFAULT_MIN_TOPIC_LEN,
            stop_topics: DEFAULT_STOP_TOPICS.iter().map(|s| s.to_string()).collect(),
            publisher_fragments: DEFAULT_PUBLISHER_FRAGMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

pub struct NoiseFilter {
    min_topic_len: usize,
    stop_topics: HashSet<String>,
    publisher_fragments: Vec<String>,
    garbage: Vec<Regex>,
}

impl NoiseFilter {
    pub fn new(config: NoiseFilterConfig) -> Result<Self> {
        let garbage = GARBAGE_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid garbage pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            min_topic_len: config.min_topic_len,
            stop_topics: config.stop_topics.into_iter().collect(),
            publisher_fragments: config.publisher_fragments,
            garbage,
        })
    }

    /// Normalize a topic/keyword string. `None` means "drop this token".
    pub fn clean_topic(&self, raw: &str) -> Option<String> {
        let collapsed = collapse_whitespace(raw).to_lowercase();
        if collapsed.chars().count() < self.min_topic_len {
            return None;
        }
        if self.stop_topics.contains(&collapsed) {
            return None;
        }
        if self.garbage.iter().any(|re| re.is_match(&collapsed)) {
            return None;
        }
        if distinct_non_space_chars(&collapsed) <= 2 {
            return None;
        }
        Some(collapsed)
    }

    /// Normalize an organization name, keeping the original casing.
    /// Publishers and letterless strings are dropped.
    pub fn clean_organization(&self, raw: &str) -> Option<String> {
        let collapsed = collapse_whitespace(raw);
        if collapsed.is_empty() {
            return None;
        }
        if self.is_publisher(&collapsed) {
            return None;
        }
        if distinct_non_space_chars(&collapsed) <= 2 {
            return None;
        }
        if self.garbage.iter().any(|re| re.is_match(&collapsed.to_lowercase())) {
            return None;
        }
        Some(collapsed)
    }

    /// Whether the name looks like a news publisher or media brand.
    pub fn is_publisher(&self, name: &str) -> bool {
        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() {
            return false;
        }
        self.publisher_fragments
            .iter()
            .any(|fragment| lowered.contains(fragment.as_str()))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn distinct_non_space_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<HashSet<char>>()
        .len()
}
