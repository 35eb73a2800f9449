//! Shared sentiment classification policy.
//!
//! Every component that turns a score into a label goes through this
//! policy so the aggregator, trend, and velocity views can never drift
//! apart on where "positive" begins.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Threshold set for classifying sentiment scores.
#[derive(Debug, Clone, Copy)]
pub struct SentimentPolicy {
    /// Scores strictly above this are positive.
    pub positive_threshold: f64,
    /// Scores strictly below this are negative.
    pub negative_threshold: f64,
    /// Articles strictly below this are flagged as risks.
    pub risk_threshold: f64,
    /// Risks strictly below this are "high" severity.
    pub severe_risk_threshold: f64,
    /// Articles strictly above this are flagged as opportunities.
    pub opportunity_threshold: f64,
    /// Opportunities strictly above this are "high" impact.
    pub high_impact_threshold: f64,
}

impl Default for SentimentPolicy {
    fn default() -> Self {
        Self {
            positive_threshold: 0.1,
            negative_threshold: -0.1,
            risk_threshold: -0.3,
            severe_risk_threshold: -0.5,
            opportunity_threshold: 0.3,
            high_impact_threshold: 0.5,
        }
    }
}

impl SentimentPolicy {
    pub fn label(&self, score: f64) -> SentimentLabel {
        if score > self.positive_threshold {
            SentimentLabel::Positive
        } else if score < self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_thresholds_are_strict() {
        let policy = SentimentPolicy::default();
        assert_eq!(policy.label(0.2), SentimentLabel::Positive);
        assert_eq!(policy.label(0.1), SentimentLabel::Neutral);
        assert_eq!(policy.label(0.0), SentimentLabel::Neutral);
        assert_eq!(policy.label(-0.1), SentimentLabel::Neutral);
        assert_eq!(policy.label(-0.2), SentimentLabel::Negative);
    }

    #[test]
    fn label_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SentimentLabel::Positive).unwrap(),
            "\"positive\""
        );
    }
}
