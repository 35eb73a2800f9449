//! Article store abstraction.
//!
//! The engine sees the store only as "give me the full current set of
//! records". Each run reads exactly one snapshot up front and treats it
//! as immutable for the run's duration; the enrichment stage may keep
//! appending between runs without affecting a run in flight.

use crate::domain::article::ArticleRecord;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Read the full current snapshot of article records.
    async fn snapshot(&self) -> Result<Vec<ArticleRecord>>;
}
