use chrono::Utc;

use crate::config::DashboardOptions;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::Dashboard;
use crate::stats;

/// Fetches one user's profile, repositories, and event feed, then runs the
/// aggregators over them.
pub struct StatsPipeline {
    github: GitHubClient,
    options: DashboardOptions,
}

impl StatsPipeline {
    pub fn new(github: GitHubClient, options: DashboardOptions) -> Self {
        Self { github, options }
    }

    pub async fn build_dashboard(&self, username: &str) -> Result<Dashboard> {
        let user = self.github.get_user(username).await?;

        // Repositories and events are independent; fetch them in parallel.
        let (repos, events) = futures::join!(
            self.github.get_user_repos(username),
            self.github.get_user_events(username)
        );

        let repos = repos?;
        // The dashboard still renders without activity data, so a failed
        // event fetch degrades to an empty feed instead of aborting.
        let events = events.unwrap_or_else(|e| {
            tracing::warn!("Event feed unavailable for {}: {}", username, e);
            Vec::new()
        });

        if repos.is_empty() {
            tracing::warn!("No repositories found for user {}", username);
        }
        tracing::info!(
            "Fetched {} repositories and {} events for {}",
            repos.len(),
            events.len(),
            username
        );

        let now = Utc::now();
        Ok(Dashboard {
            stats: stats::github_stats(&repos, &events, now),
            languages: stats::language_distribution(&repos),
            top_repositories: stats::top_repositories(&repos, self.options.top_repo_limit),
            activity: stats::contribution_activity(&events, self.options.months, now),
            heatmap: stats::contribution_heatmap(&events, now),
            user,
            generated_at: now,
        })
    }
}
