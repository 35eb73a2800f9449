//! Article store implementations.
//!
//! `JsonArticleStore` reads the enrichment stage's JSON document from
//! disk: either a plain array of records or the document-store shape
//! `{"_default": {"1": {...}, "2": {...}}}` keyed by stringified insert
//! ids. `InMemoryArticleStore` backs tests.

use crate::domain::article::ArticleRecord;
use crate::domain::errors::StoreError;
use crate::domain::store::ArticleStore;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct JsonArticleStore {
    path: PathBuf,
}

impl JsonArticleStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<ArticleRecord>, StoreError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| StoreError::Malformed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let rows: Vec<Value> = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => {
                let Some(Value::Object(table)) = map.remove("_default") else {
                    return Err(StoreError::Malformed {
                        path: self.path.display().to_string(),
                        reason: "expected a JSON array or a \"_default\" table".to_string(),
                    });
                };
                // Keys are stringified insert ids; sort numerically so
                // record order (and with it tie-breaking downstream)
                // matches insertion order.
                let mut keyed: Vec<(String, Value)> = table.into_iter().collect();
                keyed.sort_by(|a, b| match (a.0.parse::<u64>(), b.0.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => a.0.cmp(&b.0),
                });
                keyed.into_iter().map(|(_, row)| row).collect()
            }
            _ => {
                return Err(StoreError::Malformed {
                    path: self.path.display().to_string(),
                    reason: "expected a JSON array or object".to_string(),
                })
            }
        };

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<ArticleRecord>(row) {
                Ok(article) => articles.push(article),
                Err(e) => warn!(error = %e, "skipping unreadable article record"),
            }
        }
        Ok(articles)
    }
}

#[async_trait]
impl ArticleStore for JsonArticleStore {
    async fn snapshot(&self) -> Result<Vec<ArticleRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StoreError::Unavailable {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        let articles = self.parse(&content)?;
        info!(
            articles = articles.len(),
            path = %self.path.display(),
            "article snapshot read"
        );
        Ok(articles)
    }
}

/// Fixed in-memory snapshot, for tests and demos.
pub struct InMemoryArticleStore {
    articles: Vec<ArticleRecord>,
}

impl InMemoryArticleStore {
    pub fn new(articles: Vec<ArticleRecord>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn snapshot(&self) -> Result<Vec<ArticleRecord>> {
        Ok(self.articles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_store(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_array_shaped_store() {
        let file = write_store(
            r#"[{"title": "a", "sentiment_score": 0.4}, {"title": "b", "sectors": ["finance"]}]"#,
        );
        let store = JsonArticleStore::new(file.path());
        let articles = store.snapshot().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].sentiment_score, Some(0.4));
        assert_eq!(articles[1].sectors, vec!["finance"]);
    }

    #[tokio::test]
    async fn reads_default_table_in_insert_order() {
        // Keys 2 and 10 must sort numerically, not lexically.
        let file = write_store(
            r#"{"_default": {"10": {"title": "third"}, "1": {"title": "first"}, "2": {"title": "second"}}}"#,
        );
        let store = JsonArticleStore::new(file.path());
        let articles = store.snapshot().await.unwrap();
        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let store = JsonArticleStore::new("/nonexistent/articles.json");
        let err = store.snapshot().await.unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let file = write_store("not json at all");
        let store = JsonArticleStore::new(file.path());
        let err = store.snapshot().await.unwrap_err();
        assert!(err.to_string().contains("not a readable snapshot"));
    }

    #[tokio::test]
    async fn unreadable_rows_are_skipped() {
        let file = write_store(r#"[{"title": "good"}, 42]"#);
        let store = JsonArticleStore::new(file.path());
        let articles = store.snapshot().await.unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn in_memory_store_returns_snapshot() {
        let store = InMemoryArticleStore::new(vec![ArticleRecord::default()]);
        assert_eq!(store.snapshot().await.unwrap().len(), 1);
    }
}
