//! Day-over-day sentiment velocity per sector.
//!
//! Velocity is the difference between the mean sentiment of a sector's
//! most recent day and its second-most-recent day. Sectors with fewer
//! than two distinct days of data are excluded entirely rather than
//! zero-filled.

use crate::application::{mean_or_zero, round3};
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{SectorVelocity, VelocityReport};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

const ACCELERATING_THRESHOLD: f64 = 0.1;
const DECELERATING_THRESHOLD: f64 = -0.1;
const IMPROVING_THRESHOLD: f64 = 0.05;
const DECLINING_THRESHOLD: f64 = -0.05;

pub fn velocity(articles: &[ArticleRecord]) -> VelocityReport {
    // Sector in first-encounter order -> day -> scores that day.
    let mut order: Vec<String> = Vec::new();
    let mut timelines: HashMap<String, BTreeMap<NaiveDate, Vec<f64>>> = HashMap::new();

    for article in articles {
        let Some(date) = article.event_date() else {
            continue;
        };
        let score = article.score_or_zero();
        for sector in &article.sectors {
            if !timelines.contains_key(sector) {
                order.push(sector.clone());
            }
            timelines
                .entry(sector.clone())
                .or_default()
                .entry(date)
                .or_default()
                .push(score);
        }
    }

    let mut velocities = Vec::new();
    for sector in &order {
        let days = &timelines[sector];
        if days.len() < 2 {
            continue;
        }
        let mut recent_days = days.iter().rev();
        let (Some((_, current_scores)), Some((_, previous_scores))) =
            (recent_days.next(), recent_days.next())
        else {
            continue;
        };

        let current = mean_or_zero(current_scores);
        let previous = mean_or_zero(previous_scores);
        let delta = current - previous;

        let trend = if delta > ACCELERATING_THRESHOLD {
            "accelerating"
        } else if delta < DECELERATING_THRESHOLD {
            "decelerating"
        } else {
            "stable"
        };

        velocities.push(SectorVelocity {
            sector: sector.clone(),
            current_sentiment: round3(current),
            previous_sentiment: round3(previous),
            velocity: round3(delta),
            trend: trend.to_string(),
            data_points: days.len(),
        });
    }

    velocities.sort_by(|a, b| b.velocity.abs().total_cmp(&a.velocity.abs()));

    let fastest_improving = velocities
        .iter()
        .filter(|v| v.velocity > IMPROVING_THRESHOLD)
        .cloned()
        .collect();
    let fastest_declining = velocities
        .iter()
        .filter(|v| v.velocity < DECLINING_THRESHOLD)
        .cloned()
        .collect();

    VelocityReport {
        sector_velocities: velocities,
        fastest_improving,
        fastest_declining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(sector: &str, day: u32, score: f64) -> ArticleRecord {
        ArticleRecord {
            sentiment_score: Some(score),
            sectors: vec![sector.to_string()],
            scraped_at: Some(format!("2025-08-{day:02}T12:00:00Z")),
            ..Default::default()
        }
    }

    #[test]
    fn single_day_sectors_are_excluded() {
        let articles = vec![
            article("finance", 1, 0.5),
            article("finance", 1, 0.3),
            article("tourism", 1, -0.2),
            article("tourism", 2, -0.4),
        ];
        let report = velocity(&articles);
        assert_eq!(report.sector_velocities.len(), 1);
        assert_eq!(report.sector_velocities[0].sector, "tourism");
    }

    #[test]
    fn velocity_is_latest_day_minus_previous_day() {
        let articles = vec![
            article("finance", 1, 0.1),
            article("finance", 1, 0.3), // day 1 mean 0.2
            article("finance", 2, 0.5), // day 2 mean 0.5
        ];
        let report = velocity(&articles);
        let v = &report.sector_velocities[0];
        assert_eq!(v.current_sentiment, 0.5);
        assert_eq!(v.previous_sentiment, 0.2);
        assert_eq!(v.velocity, 0.3);
        assert_eq!(v.trend, "accelerating");
        assert_eq!(v.data_points, 2);
    }

    #[test]
    fn only_last_two_days_matter() {
        let articles = vec![
            article("finance", 1, -0.9),
            article("finance", 2, 0.2),
            article("finance", 3, 0.25),
        ];
        let report = velocity(&articles);
        let v = &report.sector_velocities[0];
        assert_eq!(v.velocity, 0.05);
        assert_eq!(v.trend, "stable");
        assert_eq!(v.data_points, 3);
    }

    #[test]
    fn classification_thresholds() {
        let cases = [
            ("fast_up", 0.0, 0.2, "accelerating"),
            ("fast_down", 0.0, -0.2, "decelerating"),
            ("flat", 0.0, 0.05, "stable"),
        ];
        for (sector, day1, day2, expected) in cases {
            let articles = vec![article(sector, 1, day1), article(sector, 2, day2)];
            let report = velocity(&articles);
            assert_eq!(report.sector_velocities[0].trend, expected, "{sector}");
        }
    }

    #[test]
    fn improving_and_declining_sublists() {
        let articles = vec![
            article("up", 1, 0.0),
            article("up", 2, 0.3),
            article("down", 1, 0.0),
            article("down", 2, -0.3),
            article("flat", 1, 0.0),
            article("flat", 2, 0.01),
        ];
        let report = velocity(&articles);
        assert_eq!(report.sector_velocities.len(), 3);
        assert_eq!(report.fastest_improving.len(), 1);
        assert_eq!(report.fastest_improving[0].sector, "up");
        assert_eq!(report.fastest_declining.len(), 1);
        assert_eq!(report.fastest_declining[0].sector, "down");
    }

    #[test]
    fn sorted_by_absolute_velocity() {
        let articles = vec![
            article("small", 1, 0.0),
            article("small", 2, 0.1),
            article("large", 1, 0.0),
            article("large", 2, -0.8),
        ];
        let report = velocity(&articles);
        assert_eq!(report.sector_velocities[0].sector, "large");
    }

    #[test]
    fn undated_articles_are_ignored() {
        let mut undated = article("finance", 1, 0.9);
        undated.scraped_at = None;
        let articles = vec![undated, article("finance", 2, 0.1)];
        let report = velocity(&articles);
        // Only one dated day: excluded.
        assert!(report.sector_velocities.is_empty());
    }
}
