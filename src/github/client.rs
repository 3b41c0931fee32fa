use reqwest::{header, Client, Response, StatusCode};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;
use crate::models::{Event, GitHubUser, Repository};

/// One bounded page per resource; anything past this is not fetched.
const PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitinsight/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: config.api_url.clone(),
        })
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.rate_limiter.wait().await;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.record(&response).await;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        Self::check_status(response, &format!("user {}", username))
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Up to 100 repositories, most recently updated first.
    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        self.rate_limiter.wait().await;
        let url = format!(
            "{}/users/{}/repos?per_page={}&sort=updated",
            self.base_url, username, PAGE_SIZE
        );
        tracing::info!("Fetching repositories for: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.record(&response).await;

        Self::check_status(response, &format!("repositories of {}", username))
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Up to 100 entries of the public activity feed, newest first.
    pub async fn get_user_events(&self, username: &str) -> Result<Vec<Event>> {
        self.rate_limiter.wait().await;
        let url = format!(
            "{}/users/{}/events/public?per_page={}",
            self.base_url, username, PAGE_SIZE
        );
        tracing::info!("Fetching public events for: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.record(&response).await;

        Self::check_status(response, &format!("events of {}", username))
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    async fn check_status(response: Response, what: &str) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        if Self::quota_exhausted(&response) {
            return Err(Error::RateLimited(Self::seconds_until_reset(&response)));
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::GitHubApi(format!(
            "Failed to fetch {}: {} - {}",
            what, status, body
        )))
    }

    fn quota_exhausted(response: &Response) -> bool {
        let limited_status = response.status() == StatusCode::FORBIDDEN
            || response.status() == StatusCode::TOO_MANY_REQUESTS;
        let remaining_zero = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);
        limited_status && remaining_zero
    }

    fn seconds_until_reset(response: &Response) -> u64 {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|reset| reset.saturating_sub(now))
            .unwrap_or(60)
    }
}
