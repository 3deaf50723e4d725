//! Process configuration
//!
//! Read from the environment exactly once at startup; nothing else in the
//! workspace consults env vars. Credential values are expected in
//! plaintext — decrypting them is a deployment concern, not ours.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_MAPPINGS_BASE_URL: &str =
    "https://s3.amazonaws.com/nypl-core-objects-mapping-production";
const DEFAULT_MIXED_BIBS_PATH: &str = "data/mixed-bibs.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required env var: {0}")]
    MissingVar(&'static str),
}

/// All process configuration, constructed once and passed by reference
#[derive(Debug, Clone)]
pub struct Config {
    pub scsb_api_base_url: String,
    pub scsb_api_key: String,
    pub platform_api_base_url: String,
    pub platform_api_token: Option<String>,
    pub mappings_base_url: String,
    pub notification_email: String,
    pub mixed_bibs_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            scsb_api_base_url: required("SCSB_API_BASE_URL")?,
            scsb_api_key: required("SCSB_API_KEY")?,
            platform_api_base_url: required("PLATFORM_API_BASE_URL")?,
            platform_api_token: env::var("PLATFORM_API_TOKEN").ok().filter(|v| !v.is_empty()),
            mappings_base_url: env::var("MAPPINGS_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MAPPINGS_BASE_URL.to_string()),
            notification_email: required("NOTIFICATION_EMAIL")?,
            mixed_bibs_path: env::var("MIXED_BIBS_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MIXED_BIBS_PATH)),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
