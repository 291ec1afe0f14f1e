use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "churn-insight.toml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/v1";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub base_url: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Load `path` if given, otherwise the default file when it exists
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        Self::load_or_fallback(path, DEFAULT_CONFIG_PATH)
    }

    fn load_or_fallback(path: Option<&str>, fallback: &str) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(fallback).exists() => Self::load(fallback),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl EnvConfig {
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        Self {
            base_url: std::env::var("CHURN_API_BASE_URL").ok(),
        }
    }
}

/// Pick the base URL: command line, then environment, then file, then default.
pub fn resolve_base_url(
    cli: Option<&str>,
    env: &EnvConfig,
    file: &Config,
) -> Result<String> {
    let chosen = cli
        .or(env.base_url.as_deref())
        .or(file.api.base_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);

    let trimmed = chosen.trim().trim_end_matches('/');
    anyhow::ensure!(!trimmed.is_empty(), "API base URL is empty");

    Ok(trimmed.to_string())
}
