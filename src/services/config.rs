// src/services/config.rs
use anyhow::{Context, Result};

/// Language code used for entity detection unless LANGUAGE_CODE overrides it.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Process configuration, resolved once at startup.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Target table for extracted entity records. Required.
    pub table_name: String,
    /// Language code passed to the detection service.
    pub language_code: String,
    /// Optional endpoint override for all service clients (local testing).
    pub endpoint: Option<String>,
}

impl PipelineConfig {
    /// Reads configuration from the environment. A missing TABLE_NAME is
    /// fatal: the pipeline has nowhere to write without it.
    pub fn from_env() -> Result<Self> {
        let table_name = std::env::var("TABLE_NAME")
            .context("Missing required environment variable TABLE_NAME")?;
        let language_code =
            std::env::var("LANGUAGE_CODE").unwrap_or_else(|_| DEFAULT_LANGUAGE_CODE.to_string());
        let endpoint = std::env::var("AWS_ENDPOINT_URL").ok();

        Ok(Self {
            table_name,
            language_code,
            endpoint,
        })
    }
}
