//! Article records as produced by the upstream enrichment stage.
//!
//! Records are read-only input: the engine never mutates them, every
//! analytic derives a fresh artifact from a single immutable snapshot.
//! All enrichment fields are optional because upstream extraction is
//! best-effort; an analytic that needs a missing field skips the record
//! rather than failing the run.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entity category keys assigned by the NLP stage.
pub const ENTITY_ORG: &str = "ORG";
pub const ENTITY_GPE: &str = "GPE";
pub const ENTITY_LOC: &str = "LOC";

/// One enriched news article from the article store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    /// Compound sentiment in [-1, 1]; absent when enrichment failed.
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub sentiment_label: Option<String>,
    /// Sector tags, lower-cased canonical form expected upstream.
    #[serde(default)]
    pub sectors: Vec<String>,
    /// Entity category (PERSON/ORG/GPE/LOC) to extracted strings.
    #[serde(default)]
    pub entities: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub scraped_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ArticleRecord {
    /// Sentiment score with the missing-value convention used by the
    /// aggregation analytics (absent counts as 0.0).
    pub fn score_or_zero(&self) -> f64 {
        self.sentiment_score.unwrap_or(0.0)
    }

    /// ORG entities, raw and unfiltered.
    pub fn organizations(&self) -> &[String] {
        self.entities
            .get(ENTITY_ORG)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// GPE and LOC entities combined, the "locations" the article mentions.
    pub fn locations(&self) -> impl Iterator<Item = &String> {
        self.entities
            .get(ENTITY_GPE)
            .into_iter()
            .chain(self.entities.get(ENTITY_LOC))
            .flatten()
    }

    /// Calendar date for time-bucketed analytics.
    ///
    /// Candidate fields are tried in order (`scraped_at` first, then
    /// `updated_at`); the first that parses wins. `None` excludes the
    /// record from time-bucketed analytics only.
    pub fn event_date(&self) -> Option<NaiveDate> {
        [self.scraped_at.as_deref(), self.updated_at.as_deref()]
            .into_iter()
            .flatten()
            .find_map(parse_iso_date)
    }
}

/// Parse an ISO-8601 timestamp into its calendar date.
///
/// Upstream emits a mix of shapes ("2025-12-14T01:00:00",
/// "...T01:00:00Z", "...T01:00:00+05:30"); each parse strategy is tried
/// in sequence. Offset-carrying timestamps keep the wall-clock date as
/// written rather than converting to UTC.
pub fn parse_iso_date(ts: &str) -> Option<NaiveDate> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }

    let strategies: [fn(&str) -> Option<NaiveDate>; 3] =
        [parse_rfc3339_date, parse_naive_datetime_date, parse_bare_date];
    strategies.iter().find_map(|parse| parse(ts))
}

fn parse_rfc3339_date(ts: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.naive_local().date())
}

fn parse_naive_datetime_date(ts: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn parse_bare_date(ts: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}
