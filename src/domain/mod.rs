pub mod article;
pub mod errors;
pub mod reports;
pub mod sentiment;
pub mod store;
