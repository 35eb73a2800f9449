//! Temporal sentiment trend over calendar-day buckets.
//!
//! The verdict compares the mean of the most recent 3 daily averages
//! against the mean of the 3 days before that. The 3-vs-3 window is a
//! fixed design choice; downstream consumers are tested against exactly
//! this comparison.

use crate::application::{mean_or_zero, round3};
use crate::application::tally::Tally;
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{DailyPoint, SectorCount, TemporalTrendReport};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

const TREND_WINDOW_DAYS: usize = 3;
const MIN_DAYS_FOR_VERDICT: usize = 2 * TREND_WINDOW_DAYS;
const DAY_TOP_SECTORS: usize = 3;

pub fn analyze(articles: &[ArticleRecord]) -> TemporalTrendReport {
    struct DayBucket {
        sentiments: Vec<f64>,
        sectors: Tally,
    }

    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut excluded = 0usize;

    for article in articles {
        let Some(date) = article.event_date() else {
            excluded += 1;
            continue;
        };
        let bucket = days.entry(date).or_insert_with(|| DayBucket {
            sentiments: Vec::new(),
            sectors: Tally::new(),
        });
        bucket.sentiments.push(article.score_or_zero());
        for sector in &article.sectors {
            bucket.sectors.add(sector);
        }
    }

    if excluded > 0 {
        debug!(excluded, "articles without parsable timestamps excluded from trend");
    }

    let mut timeline = Vec::with_capacity(days.len());
    let mut raw_daily_avgs = Vec::with_capacity(days.len());

    for (date, bucket) in &days {
        let avg = mean_or_zero(&bucket.sentiments);
        raw_daily_avgs.push(avg);
        timeline.push(DailyPoint {
            date: date.format("%Y-%m-%d").to_string(),
            avg_sentiment: round3(avg),
            article_count: bucket.sentiments.len(),
            top_sectors: bucket
                .sectors
                .top(DAY_TOP_SECTORS)
                .into_iter()
                .map(|(sector, count)| SectorCount { sector, count })
                .collect(),
        });
    }

    let (trend, trend_strength) = if raw_daily_avgs.len() >= MIN_DAYS_FOR_VERDICT {
        let n = raw_daily_avgs.len();
        let recent = mean_or_zero(&raw_daily_avgs[n - TREND_WINDOW_DAYS..]);
        let previous = mean_or_zero(&raw_daily_avgs[n - MIN_DAYS_FOR_VERDICT..n - TREND_WINDOW_DAYS]);
        let trend = if recent > previous {
            "improving"
        } else {
            "declining"
        };
        (trend.to_string(), round3((recent - previous).abs()))
    } else {
        ("insufficient_data".to_string(), 0.0)
    };

    let total_days = timeline.len();
    TemporalTrendReport {
        timeline,
        trend,
        trend_strength,
        total_days,
    }
}
