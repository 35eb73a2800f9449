//! Derived indicator artifacts.
//!
//! One self-describing document per analytic, regenerated wholesale on
//! every run. Field names match the JSON consumed by the dashboard and
//! chatbot, so renames here are breaking changes for those readers.

use crate::domain::sentiment::SentimentLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCount {
    pub sector: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgCount {
    pub org: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// A nationally ranked topic with the sectors it co-occurs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic: String,
    pub count: usize,
    pub top_sectors: Vec<SectorCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalIndicators {
    pub overall_sentiment: f64,
    pub sentiment_distribution: BTreeMap<String, usize>,
    pub total_articles: usize,
    pub top_sectors: Vec<SectorCount>,
    pub top_organizations: Vec<OrgCount>,
    pub top_locations: Vec<LocationCount>,
    pub top_topics: Vec<TopicSummary>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorIndicator {
    pub article_count: usize,
    pub avg_sentiment: f64,
    pub sentiment_label: SentimentLabel,
    pub top_keywords: Vec<KeywordCount>,
    pub top_organizations: Vec<OrgCount>,
}

/// Per-sector indicators keyed by sector tag.
pub type SectorIndicators = BTreeMap<String, SectorIndicator>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub title: String,
    pub url: String,
    pub sectors: Vec<String>,
    pub sentiment: f64,
    /// "high" below the severe threshold, otherwise "medium".
    pub severity: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityFlag {
    pub title: String,
    pub url: String,
    pub sectors: Vec<String>,
    pub sentiment: f64,
    /// "high" above the high-impact threshold, otherwise "medium".
    pub impact: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskOpportunityInsights {
    /// Most negative first, capped at 10.
    pub risks: Vec<RiskFlag>,
    /// Most positive first, capped at 10.
    pub opportunities: Vec<OpportunityFlag>,
    pub total_risks: usize,
    pub total_opportunities: usize,
}

impl RiskOpportunityInsights {
    /// Leading slice of the already-ranked risk list.
    pub fn top_risks(&self, n: usize) -> &[RiskFlag] {
        &self.risks[..self.risks.len().min(n)]
    }

    /// Leading slice of the already-ranked opportunity list.
    pub fn top_opportunities(&self, n: usize) -> &[OpportunityFlag] {
        &self.opportunities[..self.opportunities.len().min(n)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Calendar date, "YYYY-MM-DD".
    pub date: String,
    pub avg_sentiment: f64,
    pub article_count: usize,
    pub top_sectors: Vec<SectorCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalTrendReport {
    pub timeline: Vec<DailyPoint>,
    /// "improving", "declining", or "insufficient_data".
    pub trend: String,
    pub trend_strength: f64,
    pub total_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub title: String,
    pub url: String,
    pub sentiment: f64,
    /// Absolute z-score, the ranking key.
    pub z_score: f64,
    pub z_score_signed: f64,
    pub sectors: Vec<String>,
    pub source: String,
    /// "extremely_negative" or "extremely_positive".
    pub anomaly_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Top 20 by absolute z-score.
    pub anomalies: Vec<Anomaly>,
    /// Count of every flagged article, not just the capped slice.
    pub total_anomalies: usize,
    pub mean_sentiment: f64,
    pub std_sentiment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMember {
    pub sector: String,
    pub avg_sentiment: f64,
    pub article_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCluster {
    pub cluster_id: usize,
    pub label: String,
    pub avg_sentiment: f64,
    /// Members sorted by descending article count.
    pub sectors: Vec<ClusterMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorClusterReport {
    /// Clusters sorted by descending mean sentiment.
    pub clusters: Vec<SectorCluster>,
    pub total_sectors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCorrelation {
    pub sector1: String,
    pub sector2: String,
    pub co_occurrence_count: usize,
    pub sector1_article_count: usize,
    pub sector2_article_count: usize,
    pub jaccard: f64,
    pub global_fraction: f64,
    pub avg_sentiment: f64,
    /// Composite of co-mention share, Jaccard, and global fraction.
    pub score: f64,
    /// "very_strong", "strong", or "moderate".
    pub correlation_strength: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Top 20 pairs by composite score.
    pub top_correlations: Vec<SectorCorrelation>,
    pub total_correlations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorVelocity {
    pub sector: String,
    pub current_sentiment: f64,
    pub previous_sentiment: f64,
    pub velocity: f64,
    /// "accelerating", "decelerating", or "stable".
    pub trend: String,
    /// Distinct days of data behind this sector.
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityReport {
    /// All qualifying sectors, sorted by absolute velocity.
    pub sector_velocities: Vec<SectorVelocity>,
    /// Sectors with velocity above +0.05, same ordering.
    pub fastest_improving: Vec<SectorVelocity>,
    /// Sectors with velocity below -0.05, same ordering.
    pub fastest_declining: Vec<SectorVelocity>,
}
