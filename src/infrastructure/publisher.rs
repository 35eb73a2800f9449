//! Artifact publishing.
//!
//! One JSON document per analytic, overwritten wholesale each run.
//! Writes go through a temp file followed by a rename so a dashboard
//! reading mid-publish never observes a half-written document.

use crate::application::engine::IntelligenceRun;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const NATIONAL_INDICATORS_FILE: &str = "national_indicators.json";
pub const SECTOR_INDICATORS_FILE: &str = "sector_indicators.json";
pub const RISK_OPPORTUNITY_FILE: &str = "risk_opportunity_insights.json";
pub const TEMPORAL_TRENDS_FILE: &str = "temporal_trends.json";
pub const ANOMALIES_FILE: &str = "anomalies.json";
pub const SECTOR_CLUSTERS_FILE: &str = "sector_clusters.json";
pub const SECTOR_CORRELATIONS_FILE: &str = "sector_correlations.json";
pub const SENTIMENT_VELOCITY_FILE: &str = "sentiment_velocity.json";

pub struct IndicatorPublisher {
    output_dir: PathBuf,
}

impl IndicatorPublisher {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Write every artifact of a completed run.
    pub fn publish(&self, run: &IntelligenceRun) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "failed to create indicator directory {}",
                self.output_dir.display()
            )
        })?;

        self.write_artifact(NATIONAL_INDICATORS_FILE, &run.national)?;
        self.write_artifact(SECTOR_INDICATORS_FILE, &run.sectors)?;
        self.write_artifact(RISK_OPPORTUNITY_FILE, &run.insights)?;
        self.write_artifact(TEMPORAL_TRENDS_FILE, &run.trends)?;
        self.write_artifact(ANOMALIES_FILE, &run.anomalies)?;
        self.write_artifact(SECTOR_CLUSTERS_FILE, &run.clusters)?;
        self.write_artifact(SECTOR_CORRELATIONS_FILE, &run.correlations)?;
        self.write_artifact(SENTIMENT_VELOCITY_FILE, &run.velocity)?;

        info!(dir = %self.output_dir.display(), "published all indicator artifacts");
        Ok(())
    }

    fn write_artifact<T: Serialize>(&self, name: &str, artifact: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(artifact)
            .with_context(|| format!("failed to serialize {name}"))?;

        let final_path = self.output_dir.join(name);
        let temp_path = final_path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &final_path)
            .with_context(|| format!("failed to rename {}", final_path.display()))?;
        Ok(())
    }
}
