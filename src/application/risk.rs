//! Article-level risk and opportunity flags.
//!
//! Pure threshold classification on the shared sentiment policy: strong
//! negatives become risks, strong positives become opportunities, and
//! most articles land in neither list.

use crate::application::round3;
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{OpportunityFlag, RiskFlag, RiskOpportunityInsights};
use crate::domain::sentiment::SentimentPolicy;

const MAX_FLAGS: usize = 10;

pub fn detect(articles: &[ArticleRecord], policy: &SentimentPolicy) -> RiskOpportunityInsights {
    let mut risks = Vec::new();
    let mut opportunities = Vec::new();

    for article in articles {
        let Some(score) = article.sentiment_score else {
            continue;
        };

        if score < policy.risk_threshold {
            let severity = if score < policy.severe_risk_threshold {
                "high"
            } else {
                "medium"
            };
            risks.push(RiskFlag {
                title: article.title.clone(),
                url: article.url.clone(),
                sectors: article.sectors.clone(),
                sentiment: round3(score),
                severity: severity.to_string(),
                kind: "negative_sentiment".to_string(),
            });
        }

        if score > policy.opportunity_threshold {
            let impact = if score > policy.high_impact_threshold {
                "high"
            } else {
                "medium"
            };
            opportunities.push(OpportunityFlag {
                title: article.title.clone(),
                url: article.url.clone(),
                sectors: article.sectors.clone(),
                sentiment: round3(score),
                impact: impact.to_string(),
                kind: "positive_sentiment".to_string(),
            });
        }
    }

    // Most negative risk first, most positive opportunity first.
    risks.sort_by(|a, b| a.sentiment.total_cmp(&b.sentiment));
    opportunities.sort_by(|a, b| b.sentiment.total_cmp(&a.sentiment));

    let total_risks = risks.len();
    let total_opportunities = opportunities.len();
    risks.truncate(MAX_FLAGS);
    opportunities.truncate(MAX_FLAGS);

    RiskOpportunityInsights {
        risks,
        opportunities,
        total_risks,
        total_opportunities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, score: Option<f64>) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            sentiment_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn thresholds_are_strict() {
        let policy = SentimentPolicy::default();
        let articles = vec![
            article("exactly risk threshold", Some(-0.3)),
            article("exactly opportunity threshold", Some(0.3)),
            article("mild", Some(0.1)),
        ];
        let insights = detect(&articles, &policy);
        assert!(insights.risks.is_empty());
        assert!(insights.opportunities.is_empty());
    }

    #[test]
    fn severity_and_impact_tiers() {
        let policy = SentimentPolicy::default();
        let articles = vec![
            article("bad", Some(-0.4)),
            article("catastrophic", Some(-0.8)),
            article("boundary risk", Some(-0.5)), // not strictly below -0.5
            article("good", Some(0.4)),
            article("excellent", Some(0.9)),
        ];
        let insights = detect(&articles, &policy);

        assert_eq!(insights.risks[0].title, "catastrophic");
        assert_eq!(insights.risks[0].severity, "high");
        assert_eq!(insights.risks[1].title, "boundary risk");
        assert_eq!(insights.risks[1].severity, "medium");
        assert_eq!(insights.risks[2].severity, "medium");

        assert_eq!(insights.opportunities[0].title, "excellent");
        assert_eq!(insights.opportunities[0].impact, "high");
        assert_eq!(insights.opportunities[1].impact, "medium");
    }

    #[test]
    fn missing_scores_are_skipped() {
        let insights = detect(&[article("unknown", None)], &SentimentPolicy::default());
        assert_eq!(insights.total_risks, 0);
        assert_eq!(insights.total_opportunities, 0);
    }

    #[test]
    fn lists_capped_at_ten_with_uncapped_totals() {
        let articles: Vec<ArticleRecord> = (0..14)
            .map(|i| article(&format!("r{i}"), Some(-0.4 - (i as f64) * 0.01)))
            .collect();
        let insights = detect(&articles, &SentimentPolicy::default());
        assert_eq!(insights.risks.len(), 10);
        assert_eq!(insights.total_risks, 14);
        assert_eq!(insights.top_risks(5).len(), 5);
        // Most negative first.
        assert_eq!(insights.risks[0].title, "r13");
    }
}
