//! Statistical sentiment outliers via z-score.
//!
//! Small corpora produce meaningless z-scores, so fewer than 10 scored
//! articles yields an explicit "insufficient data" report instead of a
//! result. Zero variance likewise yields zero anomalies.

use crate::application::round3;
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{Anomaly, AnomalyReport};
use statrs::statistics::Statistics;

const MIN_SCORED_ARTICLES: usize = 10;
const Z_THRESHOLD: f64 = 2.0;
const MAX_ANOMALIES: usize = 20;
const TITLE_LIMIT: usize = 100;

pub fn detect(articles: &[ArticleRecord]) -> AnomalyReport {
    let scored: Vec<&ArticleRecord> = articles
        .iter()
        .filter(|a| a.sentiment_score.is_some())
        .collect();

    if scored.len() < MIN_SCORED_ARTICLES {
        return AnomalyReport {
            anomalies: Vec::new(),
            total_anomalies: 0,
            mean_sentiment: 0.0,
            std_sentiment: 0.0,
            message: Some("Insufficient data for anomaly detection".to_string()),
        };
    }

    let scores: Vec<f64> = scored.iter().filter_map(|a| a.sentiment_score).collect();
    let mean = scores.iter().mean();
    let std = scores.iter().population_std_dev();

    if std <= 0.0 {
        // No variance, z-scores are undefined.
        return AnomalyReport {
            anomalies: Vec::new(),
            total_anomalies: 0,
            mean_sentiment: round3(mean),
            std_sentiment: 0.0,
            message: None,
        };
    }

    let mut anomalies = Vec::new();
    for article in &scored {
        let score = article.score_or_zero();
        let z = (score - mean) / std;
        if z.abs() > Z_THRESHOLD {
            anomalies.push(Anomaly {
                title: article.title.chars().take(TITLE_LIMIT).collect(),
                url: article.url.clone(),
                sentiment: round3(score),
                z_score: round2(z.abs()),
                z_score_signed: round2(z),
                sectors: article.sectors.clone(),
                source: article.source.clone(),
                anomaly_type: if z < 0.0 {
                    "extremely_negative".to_string()
                } else {
                    "extremely_positive".to_string()
                },
            });
        }
    }

    anomalies.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
    let total_anomalies = anomalies.len();
    anomalies.truncate(MAX_ANOMALIES);

    AnomalyReport {
        anomalies,
        total_anomalies,
        mean_sentiment: round3(mean),
        std_sentiment: round3(std),
        message: None,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, score: f64) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            sentiment_score: Some(score),
            ..Default::default()
        }
    }

    #[test]
    fn nine_articles_is_always_insufficient() {
        let articles: Vec<ArticleRecord> = (0..9)
            .map(|i| article(&format!("a{i}"), if i % 2 == 0 { 0.9 } else { -0.9 }))
            .collect();
        let report = detect(&articles);
        assert!(report.anomalies.is_empty());
        assert_eq!(report.total_anomalies, 0);
        assert_eq!(
            report.message.as_deref(),
            Some("Insufficient data for anomaly detection")
        );
    }

    #[test]
    fn single_outlier_among_ten_is_flagged_positive() {
        let mut articles: Vec<ArticleRecord> =
            (0..9).map(|i| article(&format!("flat{i}"), 0.0)).collect();
        articles.push(article("spike", 0.9));

        let report = detect(&articles);
        assert_eq!(report.total_anomalies, 1);
        assert_eq!(report.anomalies[0].title, "spike");
        assert_eq!(report.anomalies[0].anomaly_type, "extremely_positive");
        // mean 0.09, population std 0.27, z = 3.0
        assert_eq!(report.mean_sentiment, 0.09);
        assert_eq!(report.std_sentiment, 0.27);
        assert_eq!(report.anomalies[0].z_score, 3.0);
        assert_eq!(report.anomalies[0].z_score_signed, 3.0);
    }

    #[test]
    fn negative_outlier_is_flagged_negative() {
        let mut articles: Vec<ArticleRecord> =
            (0..11).map(|i| article(&format!("flat{i}"), 0.1)).collect();
        articles.push(article("crash", -0.9));
        let report = detect(&articles);
        assert_eq!(report.total_anomalies, 1);
        assert_eq!(report.anomalies[0].anomaly_type, "extremely_negative");
        assert!(report.anomalies[0].z_score_signed < 0.0);
    }

    #[test]
    fn zero_variance_yields_no_anomalies() {
        let articles: Vec<ArticleRecord> =
            (0..12).map(|i| article(&format!("same{i}"), 0.4)).collect();
        let report = detect(&articles);
        assert!(report.anomalies.is_empty());
        assert_eq!(report.std_sentiment, 0.0);
        assert_eq!(report.mean_sentiment, 0.4);
        assert!(report.message.is_none());
    }

    #[test]
    fn unscored_articles_do_not_count_toward_minimum() {
        let mut articles: Vec<ArticleRecord> =
            (0..9).map(|i| article(&format!("a{i}"), 0.0)).collect();
        articles.push(ArticleRecord::default()); // no score
        let report = detect(&articles);
        assert!(report.message.is_some());
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut articles: Vec<ArticleRecord> =
            (0..9).map(|i| article(&format!("flat{i}"), 0.0)).collect();
        articles.push(article(&"x".repeat(250), 0.9));
        let report = detect(&articles);
        assert_eq!(report.anomalies[0].title.chars().count(), 100);
    }
}
