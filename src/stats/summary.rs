use chrono::{DateTime, Duration, Utc};

use crate::models::{Event, EventKind, GitHubStats, Repository};
use crate::stats::languages::most_used_languages;

/// The stats-card summary: star/commit/PR/issue totals from the repository
/// list and event feed, plus the top languages.
///
/// Commit totals come from push-event payloads, so they only see what the
/// bounded event feed covers. PR and issue totals count events, not distinct
/// items; an open and a close of the same PR count twice.
pub fn github_stats(repos: &[Repository], events: &[Event], now: DateTime<Utc>) -> GitHubStats {
    let total_stars = repos
        .iter()
        .map(|r| u64::from(r.stargazers_count))
        .sum();

    let mut total_commits: u64 = 0;
    let mut total_prs: u32 = 0;
    let mut total_issues: u32 = 0;

    for event in events {
        match event.kind {
            EventKind::Push => total_commits += event.commit_count() as u64,
            EventKind::PullRequest => total_prs += 1,
            EventKind::Issues => total_issues += 1,
            _ => {}
        }
    }

    let one_year_ago = now - Duration::days(365);
    let contributions_last_year = events
        .iter()
        .filter(|e| e.created_at > one_year_ago)
        .count() as u32;

    GitHubStats {
        total_stars,
        total_commits,
        total_prs,
        total_issues,
        contributions_last_year,
        // Streaks take the GraphQL contribution calendar, which this feed
        // cannot substitute for; left unset rather than estimated.
        current_streak: None,
        longest_streak: None,
        total_contributions: None,
        most_used_languages: most_used_languages(repos),
    }
}
