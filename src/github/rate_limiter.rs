use reqwest::Response;
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Tracks the primary GitHub quota from response headers and holds requests
/// back while it is exhausted. Anonymous callers get 60 requests per hour,
/// so a dashboard run close to the limit waits for the reset instead of
/// burning its three requests on 403s.
pub struct RateLimiter {
    state: Mutex<QuotaState>,
}

struct QuotaState {
    remaining: u32,
    reset_at: Option<std::time::Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QuotaState {
                remaining: u32::MAX,
                reset_at: None,
            }),
        }
    }

    /// Blocks until the quota allows another request.
    pub async fn wait(&self) {
        let reset_at = {
            let state = self.state.lock().await;
            match (state.remaining, state.reset_at) {
                (0, Some(reset_at)) => reset_at,
                _ => return,
            }
        };

        let now = std::time::Instant::now();
        if reset_at > now {
            let wait_duration = reset_at - now;
            tracing::info!("Rate limited, waiting {:?}", wait_duration);
            sleep(wait_duration).await;
        }
    }

    /// Records the quota headers of a response.
    pub async fn record(&self, response: &Response) {
        let Some(remaining) = header_value(response, "x-ratelimit-remaining") else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = remaining as u32;
        if let Some(reset_timestamp) = header_value(response, "x-ratelimit-reset") {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            if reset_timestamp > now {
                state.reset_at = Some(
                    std::time::Instant::now()
                        + std::time::Duration::from_secs(reset_timestamp - now),
                );
            }
        }
    }
}

fn header_value(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
