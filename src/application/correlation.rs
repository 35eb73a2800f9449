//! Sector co-occurrence correlation.
//!
//! Every unordered pair of distinct sectors appearing in the same
//! article counts as one co-mention. Pairs must clear three
//! data-derived gates (dynamic co-mention minimum, Jaccard similarity
//! of article sets, global fraction) so one-off co-mentions in a large
//! corpus never rank.

use crate::application::{mean_or_zero, round3};
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{CorrelationReport, SectorCorrelation};
use std::collections::{BTreeSet, HashMap, HashSet};

const MIN_CO_MENTIONS_BASE: usize = 2;
const MIN_JACCARD: f64 = 0.05;
const MIN_GLOBAL_FRACTION: f64 = 0.02;
const MAX_PAIRS: usize = 20;

const VERY_STRONG_COUNT: usize = 8;
const VERY_STRONG_JACCARD: f64 = 0.15;
const STRONG_COUNT: usize = 4;
const STRONG_JACCARD: f64 = 0.10;

struct PairStats {
    count: usize,
    sentiments: Vec<f64>,
}

pub fn correlate(articles: &[ArticleRecord]) -> CorrelationReport {
    let mut sector_articles: HashMap<String, HashSet<usize>> = HashMap::new();
    let mut pairs: HashMap<(String, String), PairStats> = HashMap::new();

    for (idx, article) in articles.iter().enumerate() {
        // Distinct lowercased sectors; BTreeSet keeps pair keys ordered.
        let sectors: BTreeSet<String> = article
            .sectors
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if sectors.len() < 2 {
            continue;
        }

        let sentiment = article.score_or_zero();
        for sector in &sectors {
            sector_articles
                .entry(sector.clone())
                .or_default()
                .insert(idx);
        }

        let ordered: Vec<&String> = sectors.iter().collect();
        for i in 0..ordered.len() {
            for j in i + 1..ordered.len() {
                let key = (ordered[i].clone(), ordered[j].clone());
                let stats = pairs.entry(key).or_insert(PairStats {
                    count: 0,
                    sentiments: Vec::new(),
                });
                stats.count += 1;
                stats.sentiments.push(sentiment);
            }
        }
    }

    if pairs.is_empty() {
        return CorrelationReport {
            top_correlations: Vec::new(),
            total_correlations: 0,
        };
    }

    let total_articles = articles.len();
    let max_pair_count = pairs.values().map(|p| p.count).max().unwrap_or(1);
    let dynamic_min =
        MIN_CO_MENTIONS_BASE.max(((0.01 * max_pair_count as f64) as usize).max(1));

    let mut correlations = Vec::new();
    for ((sector1, sector2), stats) in &pairs {
        if stats.count < dynamic_min {
            continue;
        }

        let set1 = &sector_articles[sector1];
        let set2 = &sector_articles[sector2];
        let intersection = set1.intersection(set2).count();
        let union = set1.len() + set2.len() - intersection;
        let jaccard = if union > 0 {
            stats.count as f64 / union as f64
        } else {
            0.0
        };
        let global_fraction = stats.count as f64 / total_articles as f64;

        if jaccard < MIN_JACCARD || global_fraction < MIN_GLOBAL_FRACTION {
            continue;
        }

        let score = 0.5 * (stats.count as f64 / max_pair_count as f64)
            + 0.3 * jaccard
            + 0.2 * global_fraction;

        let strength = if stats.count >= VERY_STRONG_COUNT && jaccard >= VERY_STRONG_JACCARD {
            "very_strong"
        } else if stats.count >= STRONG_COUNT && jaccard >= STRONG_JACCARD {
            "strong"
        } else {
            "moderate"
        };

        correlations.push(SectorCorrelation {
            sector1: sector1.clone(),
            sector2: sector2.clone(),
            co_occurrence_count: stats.count,
            sector1_article_count: set1.len(),
            sector2_article_count: set2.len(),
            jaccard: round3(jaccard),
            global_fraction: round3(global_fraction),
            avg_sentiment: round3(mean_or_zero(&stats.sentiments)),
            score: round3(score),
            correlation_strength: strength.to_string(),
        });
    }

    correlations.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.sector1.cmp(&b.sector1))
            .then_with(|| a.sector2.cmp(&b.sector2))
    });

    let total_correlations = correlations.len();
    correlations.truncate(MAX_PAIRS);

    CorrelationReport {
        top_correlations: correlations,
        total_correlations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(sectors: &[&str], score: f64) -> ArticleRecord {
        ArticleRecord {
            sentiment_score: Some(score),
            sectors: sectors.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn no_multi_sector_articles_yields_empty_report() {
        let articles = vec![
            article(&["finance"], 0.2),
            article(&["tourism"], -0.2),
            article(&[], 0.0),
        ];
        let report = correlate(&articles);
        assert_eq!(report.total_correlations, 0);
        assert!(report.top_correlations.is_empty());
    }

    #[test]
    fn single_co_mention_is_below_the_minimum() {
        let articles = vec![article(&["finance", "tourism"], 0.1)];
        let report = correlate(&articles);
        assert_eq!(report.total_correlations, 0);
    }

    #[test]
    fn qualifying_pair_reports_all_signals() {
        let mut articles = Vec::new();
        for _ in 0..6 {
            articles.push(article(&["finance", "tourism"], 0.2));
        }
        for _ in 0..6 {
            articles.push(article(&["energy"], 0.0));
        }
        let report = correlate(&articles);
        assert_eq!(report.total_correlations, 1);

        let pair = &report.top_correlations[0];
        assert_eq!(pair.sector1, "finance");
        assert_eq!(pair.sector2, "tourism");
        assert_eq!(pair.co_occurrence_count, 6);
        assert_eq!(pair.sector1_article_count, 6);
        // Both sectors appear in exactly the same 6 articles.
        assert_eq!(pair.jaccard, 1.0);
        assert_eq!(pair.global_fraction, 0.5);
        assert_eq!(pair.avg_sentiment, 0.2);
        // 0.5 * 1.0 + 0.3 * 1.0 + 0.2 * 0.5
        assert_eq!(pair.score, 0.9);
        assert_eq!(pair.correlation_strength, "strong");
    }

    #[test]
    fn very_strong_requires_eight_co_mentions() {
        let mut articles = Vec::new();
        for _ in 0..8 {
            articles.push(article(&["finance", "tourism"], 0.0));
        }
        let report = correlate(&articles);
        assert_eq!(
            report.top_correlations[0].correlation_strength,
            "very_strong"
        );
    }

    #[test]
    fn sectors_are_lowercased_and_deduplicated() {
        let mut articles = Vec::new();
        for _ in 0..3 {
            articles.push(article(&["Finance", "finance", "Tourism"], 0.0));
        }
        let report = correlate(&articles);
        assert_eq!(report.total_correlations, 1);
        let pair = &report.top_correlations[0];
        assert_eq!(pair.sector1, "finance");
        assert_eq!(pair.sector2, "tourism");
        assert_eq!(pair.co_occurrence_count, 3);
    }

    #[test]
    fn low_global_fraction_is_gated_out() {
        let mut articles = Vec::new();
        // 2 co-mentions against 198 unrelated articles: fraction 0.01 < 0.02.
        for _ in 0..2 {
            articles.push(article(&["finance", "tourism"], 0.0));
        }
        for i in 0..198 {
            articles.push(article(&[&format!("solo{i}")], 0.0));
        }
        let report = correlate(&articles);
        assert_eq!(report.total_correlations, 0);
    }

    #[test]
    fn pairs_ranked_by_composite_score() {
        let mut articles = Vec::new();
        for _ in 0..6 {
            articles.push(article(&["finance", "tourism"], 0.0));
        }
        for _ in 0..3 {
            articles.push(article(&["energy", "shipping"], 0.0));
        }
        let report = correlate(&articles);
        assert_eq!(report.total_correlations, 2);
        assert_eq!(report.top_correlations[0].sector1, "finance");
        assert!(report.top_correlations[0].score > report.top_correlations[1].score);
    }
}
