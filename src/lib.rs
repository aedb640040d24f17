pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod reconciler;
pub mod store;
pub mod types;
