//! Behavioral clustering of sectors.
//!
//! Each sector becomes a 4-feature vector: mean sentiment, article
//! count, total raw ORG entity mentions, mean word count. Features are
//! standardized before clustering because counts live on far larger
//! scales than sentiment and would otherwise dominate the distance.
//! Lloyd k-means runs with a fixed seed so the report is deterministic
//! run to run.

use crate::application::{mean_or_zero, round3};
use crate::domain::article::ArticleRecord;
use crate::domain::reports::{ClusterMember, SectorCluster, SectorClusterReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

const MIN_SECTORS: usize = 3;
const MAX_CLUSTERS: usize = 3;
const KMEANS_SEED: u64 = 42;
const KMEANS_MAX_ITER: usize = 100;

const HIGH_PERFORMANCE_THRESHOLD: f64 = 0.2;
const CHALLENGED_THRESHOLD: f64 = -0.1;

struct SectorFeatures {
    name: String,
    sentiments: Vec<f64>,
    article_count: usize,
    org_count: usize,
    word_counts: Vec<f64>,
}

pub fn cluster(articles: &[ArticleRecord]) -> SectorClusterReport {
    let mut features: Vec<SectorFeatures> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for article in articles {
        let sentiment = article.score_or_zero();
        let orgs = article.organizations().len();
        for sector in &article.sectors {
            let i = *index.entry(sector.clone()).or_insert_with(|| {
                features.push(SectorFeatures {
                    name: sector.clone(),
                    sentiments: Vec::new(),
                    article_count: 0,
                    org_count: 0,
                    word_counts: Vec::new(),
                });
                features.len() - 1
            });
            let f = &mut features[i];
            f.sentiments.push(sentiment);
            f.article_count += 1;
            f.org_count += orgs;
            f.word_counts.push(article.word_count as f64);
        }
    }

    if features.len() < MIN_SECTORS {
        return SectorClusterReport {
            clusters: Vec::new(),
            total_sectors: features.len(),
            message: Some("Insufficient sectors for clustering".to_string()),
        };
    }

    let matrix: Vec<[f64; 4]> = features
        .iter()
        .map(|f| {
            [
                mean_or_zero(&f.sentiments),
                f.article_count as f64,
                f.org_count as f64,
                mean_or_zero(&f.word_counts),
            ]
        })
        .collect();
    let standardized = standardize(&matrix);

    let k = MAX_CLUSTERS.min(features.len());
    let assignments = kmeans(&standardized, k, KMEANS_SEED, KMEANS_MAX_ITER);

    let mut groups: Vec<Vec<ClusterMember>> = vec![Vec::new(); k];
    for (sector, &cluster_id) in features.iter().zip(&assignments) {
        groups[cluster_id].push(ClusterMember {
            sector: sector.name.clone(),
            avg_sentiment: round3(mean_or_zero(&sector.sentiments)),
            article_count: sector.article_count,
        });
    }

    let mut clusters: Vec<SectorCluster> = groups
        .into_iter()
        .enumerate()
        .filter(|(_, members)| !members.is_empty())
        .map(|(cluster_id, mut members)| {
            members.sort_by(|a, b| b.article_count.cmp(&a.article_count));
            let avg_sentiment = round3(mean_or_zero(
                &members.iter().map(|m| m.avg_sentiment).collect::<Vec<_>>(),
            ));
            let label = if avg_sentiment > HIGH_PERFORMANCE_THRESHOLD {
                "High Performance Sectors"
            } else if avg_sentiment < CHALLENGED_THRESHOLD {
                "Challenged Sectors"
            } else {
                "Stable Sectors"
            };
            SectorCluster {
                cluster_id,
                label: label.to_string(),
                avg_sentiment,
                sectors: members,
            }
        })
        .collect();

    clusters.sort_by(|a, b| b.avg_sentiment.total_cmp(&a.avg_sentiment));

    SectorClusterReport {
        clusters,
        total_sectors: features.len(),
        message: None,
    }
}

/// Zero-mean, unit-variance scaling per feature column. A column with
/// no variance maps to zeros.
fn standardize(matrix: &[[f64; 4]]) -> Vec<[f64; 4]> {
    let n = matrix.len() as f64;
    let mut means = [0.0f64; 4];
    let mut stds = [0.0f64; 4];

    for col in 0..4 {
        means[col] = matrix.iter().map(|row| row[col]).sum::<f64>() / n;
        let variance = matrix
            .iter()
            .map(|row| (row[col] - means[col]).powi(2))
            .sum::<f64>()
            / n;
        stds[col] = variance.sqrt();
    }

    matrix
        .iter()
        .map(|row| {
            let mut scaled = [0.0f64; 4];
            for col in 0..4 {
                if stds[col] > 0.0 {
                    scaled[col] = (row[col] - means[col]) / stds[col];
                }
            }
            scaled
        })
        .collect()
}

/// Lloyd's algorithm with seeded initial centroids sampled from the
/// points, converging when assignments stop changing.
fn kmeans(points: &[[f64; 4]], k: usize, seed: u64, max_iter: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let initial = rand::seq::index::sample(&mut rng, points.len(), k);
    let mut centroids: Vec<[f64; 4]> = initial.iter().map(|i| points[i]).collect();
    let mut assignments = vec![0usize; points.len()];

    for _ in 0..max_iter {
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let nearest = nearest_centroid(point, &centroids);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }

        for (cluster_id, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&[f64; 4]> = points
                .iter()
                .zip(&assignments)
                .filter(|(_, &a)| a == cluster_id)
                .map(|(p, _)| p)
                .collect();
            if members.is_empty() {
                continue; // keep the previous centroid
            }
            let mut updated = [0.0f64; 4];
            for member in &members {
                for col in 0..4 {
                    updated[col] += member[col];
                }
            }
            for value in &mut updated {
                *value /= members.len() as f64;
            }
            *centroid = updated;
        }

        if !changed {
            break;
        }
    }

    assignments
}

fn nearest_centroid(point: &[f64; 4], centroids: &[[f64; 4]]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist: f64 = point
            .iter()
            .zip(centroid)
            .map(|(p, c)| (p - c).powi(2))
            .sum();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
