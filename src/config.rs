use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_STORE_PATH: &str = "data/raw/articles.json";
const DEFAULT_OUTPUT_DIR: &str = "data/indicators";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the enriched-article snapshot document.
    pub store_path: PathBuf,
    /// Directory the indicator artifacts are published into.
    pub output_dir: PathBuf,
    /// Minimum keyword length accepted by the noise filter.
    pub min_topic_len: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let store_path = env::var("NEWSINTEL_STORE")
            .unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string())
            .into();
        let output_dir = env::var("NEWSINTEL_OUT")
            .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
            .into();
        let min_topic_len = match env::var("NEWSINTEL_MIN_TOPIC_LEN") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid NEWSINTEL_MIN_TOPIC_LEN: {raw}"))?,
            Err(_) => 5,
        };

        Ok(Self {
            store_path,
            output_dir,
            min_topic_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so env mutation cannot race a parallel sibling.
    #[test]
    fn from_env_defaults_and_overrides() {
        env::remove_var("NEWSINTEL_STORE");
        env::remove_var("NEWSINTEL_OUT");
        env::remove_var("NEWSINTEL_MIN_TOPIC_LEN");
        let config = Config::from_env().unwrap();
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.min_topic_len, 5);

        env::set_var("NEWSINTEL_STORE", "/tmp/articles.json");
        env::set_var("NEWSINTEL_MIN_TOPIC_LEN", "3");
        let config = Config::from_env().unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/articles.json"));
        assert_eq!(config.min_topic_len, 3);

        env::set_var("NEWSINTEL_MIN_TOPIC_LEN", "not a number");
        assert!(Config::from_env().is_err());
        env::remove_var("NEWSINTEL_STORE");
        env::remove_var("NEWSINTEL_MIN_TOPIC_LEN");
    }
}
