//! National and per-sector indicator summaries.
//!
//! Both builders are pure functions over the snapshot: simple frequency
//! tallies, mean sentiment, and fixed-size top-N rankings. An article
//! carrying k sector tags contributes to all k sector buckets.

use crate::application::noise::NoiseFilter;
use crate::application::tally::Tally;
use crate::application::{mean_or_zero, round3};
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{
    KeywordCount, LocationCount, NationalIndicators, OrgCount, SectorCount, SectorIndicator,
    SectorIndicators, TopicSummary,
};
use crate::domain::sentiment::SentimentPolicy;
use chrono::Utc;
use std::collections::HashMap;

const TOP_SECTORS: usize = 5;
const TOP_ORGANIZATIONS: usize = 10;
const TOP_LOCATIONS: usize = 10;
const TOP_TOPICS: usize = 10;
const TOPIC_TOP_SECTORS: usize = 3;
const SECTOR_TOP_KEYWORDS: usize = 10;
const SECTOR_TOP_ORGS: usize = 5;
/// Only the leading keywords of each article feed sector rankings.
const KEYWORDS_PER_ARTICLE: usize = 5;

pub fn build_national_indicators(
    articles: &[ArticleRecord],
    filter: &NoiseFilter,
) -> NationalIndicators {
    let scores: Vec<f64> = articles.iter().filter_map(|a| a.sentiment_score).collect();
    let overall_sentiment = round3(mean_or_zero(&scores));

    let mut distribution = std::collections::BTreeMap::new();
    for article in articles {
        let label = article
            .sentiment_label
            .clone()
            .unwrap_or_else(|| "neutral".to_string());
        *distribution.entry(label).or_insert(0) += 1;
    }

    let mut sector_tally = Tally::new();
    let mut org_tally = Tally::new();
    let mut location_tally = Tally::new();
    for article in articles {
        for sector in &article.sectors {
            sector_tally.add(sector);
        }
        for org in article.organizations() {
            if let Some(cleaned) = filter.clean_organization(org) {
                org_tally.add(&cleaned);
            }
        }
        for location in article.locations() {
            location_tally.add(location);
        }
    }

    NationalIndicators {
        overall_sentiment,
        sentiment_distribution: distribution,
        total_articles: articles.len(),
        top_sectors: sector_tally
            .top(TOP_SECTORS)
            .into_iter()
            .map(|(sector, count)| SectorCount { sector, count })
            .collect(),
        top_organizations: org_tally
            .top(TOP_ORGANIZATIONS)
            .into_iter()
            .map(|(org, count)| OrgCount { org, count })
            .collect(),
        top_locations: location_tally
            .top(TOP_LOCATIONS)
            .into_iter()
            .map(|(location, count)| LocationCount { location, count })
            .collect(),
        top_topics: build_top_topics(articles, filter, TOP_TOPICS),
        timestamp: Utc::now(),
    }
}

/// National topic ranking over cleaned keywords, each topic carrying the
/// sectors it most often co-occurs with.
pub fn build_top_topics(
    articles: &[ArticleRecord],
    filter: &NoiseFilter,
    max_topics: usize,
) -> Vec<TopicSummary> {
    let mut topic_tally = Tally::new();
    let mut topic_sectors: HashMap<String, Tally> = HashMap::new();

    for article in articles {
        for keyword in &article.keywords {
            let Some(topic) = filter.clean_topic(keyword) else {
                continue;
            };
            topic_tally.add(&topic);
            let sectors = topic_sectors.entry(topic).or_default();
            for sector in &article.sectors {
                sectors.add(sector);
            }
        }
    }

    topic_tally
        .top(max_topics)
        .into_iter()
        .map(|(topic, count)| {
            let top_sectors = topic_sectors
                .get(&topic)
                .map(|tally| {
                    tally
                        .top(TOPIC_TOP_SECTORS)
                        .into_iter()
                        .map(|(sector, count)| SectorCount { sector, count })
                        .collect()
                })
                .unwrap_or_default();
            TopicSummary {
                topic,
                count,
                top_sectors,
            }
        })
        .collect()
}

pub fn build_sector_indicators(
    articles: &[ArticleRecord],
    filter: &NoiseFilter,
    policy: &SentimentPolicy,
) -> SectorIndicators {
    struct Bucket {
        scores: Vec<f64>,
        keywords: Tally,
        orgs: Tally,
    }

    let mut buckets: HashMap<String, Bucket> = HashMap::new();

    for article in articles {
        let score = article.score_or_zero();
        let cleaned_orgs: Vec<String> = article
            .organizations()
            .iter()
            .filter_map(|org| filter.clean_organization(org))
            .collect();
        let cleaned_keywords: Vec<String> = article
            .keywords
            .iter()
            .take(KEYWORDS_PER_ARTICLE)
            .filter_map(|kw| filter.clean_topic(kw))
            .collect();

        for sector in &article.sectors {
            let bucket = buckets.entry(sector.clone()).or_insert_with(|| Bucket {
                scores: Vec::new(),
                keywords: Tally::new(),
                orgs: Tally::new(),
            });
            bucket.scores.push(score);
            for keyword in &cleaned_keywords {
                bucket.keywords.add(keyword);
            }
            for org in &cleaned_orgs {
                bucket.orgs.add(org);
            }
        }
    }

    buckets
        .into_iter()
        .map(|(sector, bucket)| {
            let avg = mean_or_zero(&bucket.scores);
            let indicator = SectorIndicator {
                article_count: bucket.scores.len(),
                avg_sentiment: round3(avg),
                sentiment_label: policy.label(avg),
                top_keywords: bucket
                    .keywords
                    .top(SECTOR_TOP_KEYWORDS)
                    .into_iter()
                    .map(|(keyword, count)| KeywordCount { keyword, count })
                    .collect(),
                top_organizations: bucket
                    .orgs
                    .top(SECTOR_TOP_ORGS)
                    .into_iter()
                    .map(|(org, count)| OrgCount { org, count })
                    .collect(),
            };
            (sector, indicator)
        })
        .collect()
}
