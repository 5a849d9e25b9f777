// src/services/mod.rs
pub mod config;
pub mod content_fetcher;
pub mod dispatcher;
pub mod entity_detector;
pub mod errors;
pub mod record_mapper;
pub mod record_writer;
pub mod types;
