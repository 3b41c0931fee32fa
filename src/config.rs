use crate::error::{Error, Result};
use std::env;

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Personal access token. The consumed endpoints are public, so this is
    /// optional; providing one raises the rate-limit quota.
    pub github_token: Option<String>,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let api_url = env::var("GITHUB_API_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "GITHUB_API_URL must be an http(s) URL, got: {}",
                api_url
            )));
        }

        Ok(Self {
            github_token,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Per-run parameters, resolved from CLI flags.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Trailing calendar months covered by the activity chart.
    pub months: u32,
    /// How many repositories the top-repository ranking keeps.
    pub top_repo_limit: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            months: 6,
            top_repo_limit: 5,
        }
    }
}
