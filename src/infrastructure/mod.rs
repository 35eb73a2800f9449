pub mod json_store;
pub mod publisher;

pub use json_store::{InMemoryArticleStore, JsonArticleStore};
