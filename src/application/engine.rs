//! The "run all analytics" entry point.
//!
//! A run reads one immutable snapshot from the store, computes every
//! artifact in memory, and only then publishes. A store failure aborts
//! before any write so the previous run's artifacts stay visible as the
//! last-known-good state.

use crate::application::noise::{NoiseFilter, NoiseFilterConfig};
use crate::application::{aggregator, anomaly, clusters, correlation, risk, trends, velocity};
use crate::domain::reports::{
    AnomalyReport, CorrelationReport, NationalIndicators, RiskOpportunityInsights,
    SectorClusterReport, SectorIndicators, TemporalTrendReport, VelocityReport,
};
use crate::domain::sentiment::SentimentPolicy;
use crate::domain::store::ArticleStore;
use crate::infrastructure::publisher::IndicatorPublisher;
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// The full in-memory result set of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct IntelligenceRun {
    pub national: NationalIndicators,
    pub sectors: SectorIndicators,
    pub insights: RiskOpportunityInsights,
    pub trends: TemporalTrendReport,
    pub anomalies: AnomalyReport,
    pub clusters: SectorClusterReport,
    pub correlations: CorrelationReport,
    pub velocity: VelocityReport,
}

pub struct IntelligenceEngine {
    store: Arc<dyn ArticleStore>,
    filter: NoiseFilter,
    policy: SentimentPolicy,
}

impl IntelligenceEngine {
    pub fn new(store: Arc<dyn ArticleStore>) -> Result<Self> {
        Self::with_filter_config(store, NoiseFilterConfig::default())
    }

    pub fn with_filter_config(
        store: Arc<dyn ArticleStore>,
        filter_config: NoiseFilterConfig,
    ) -> Result<Self> {
        Ok(Self {
            store,
            filter: NoiseFilter::new(filter_config)?,
            policy: SentimentPolicy::default(),
        })
    }

    /// Compute all artifacts from a single snapshot read.
    pub async fn run(&self) -> Result<IntelligenceRun> {
        let snapshot = self
            .store
            .snapshot()
            .await
            .context("reading article snapshot")?;
        info!(articles = snapshot.len(), "snapshot loaded, running analytics");

        let national = aggregator::build_national_indicators(&snapshot, &self.filter);
        let sectors = aggregator::build_sector_indicators(&snapshot, &self.filter, &self.policy);
        let insights = risk::detect(&snapshot, &self.policy);
        let trends = trends::analyze(&snapshot);
        let anomalies = anomaly::detect(&snapshot);
        let clusters = clusters::cluster(&snapshot);
        let correlations = correlation::correlate(&snapshot);
        let velocity = velocity::velocity(&snapshot);

        info!(
            sectors = sectors.len(),
            risks = insights.total_risks,
            opportunities = insights.total_opportunities,
            anomalies = anomalies.total_anomalies,
            correlations = correlations.total_correlations,
            "analytics complete"
        );

        Ok(IntelligenceRun {
            national,
            sectors,
            insights,
            trends,
            anomalies,
            clusters,
            correlations,
            velocity,
        })
    }

    /// Run all analytics, then publish every artifact. Returns the
    /// in-memory result set so callers need not re-read fresh files.
    pub async fn run_and_publish(&self, publisher: &IndicatorPublisher) -> Result<IntelligenceRun> {
        let run = self.run().await?;
        publisher.publish(&run)?;
        Ok(run)
    }
}
