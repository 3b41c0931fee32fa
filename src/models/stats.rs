use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::GitHubUser;

/// One slice of the language distribution. `percentage` is the share of
/// repositories with a known primary language, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageBucket {
    pub name: String,
    pub count: u32,
    pub percentage: f64,
    pub color: &'static str,
}

/// Star/fork series for the top repositories, parallel-indexed by `labels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopRepositories {
    pub labels: Vec<String>,
    pub stars: Vec<u32>,
    pub forks: Vec<u32>,
}

impl TopRepositories {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One calendar month of contribution activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityBin {
    /// Abbreviated month plus two-digit year, e.g. `"Aug 25"`.
    pub label: String,
    pub count: u32,
}

/// One heat-map cell. `level` classifies `count` against the window maximum
/// on a 0..=4 scale; it is 0 exactly when `count` is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

/// Marks the week column where a new calendar month begins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLabel {
    pub week: usize,
    pub label: String,
}

/// Daily contribution heat-map over the trailing six months, arranged in
/// Sunday-start weeks.
#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    pub weeks: Vec<Vec<HeatmapDay>>,
    pub month_labels: Vec<MonthLabel>,
    /// Cell colors indexed by activity level.
    pub palette: [&'static str; 5],
}

/// A run of consecutive contribution days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Streak {
    pub count: u32,
    pub start: String,
    pub end: String,
}

/// The stats-card summary.
///
/// The streak fields and `total_contributions` cannot be derived from the
/// public REST event feed (that takes the GraphQL contribution calendar),
/// so they stay `None` instead of carrying invented numbers.
#[derive(Debug, Clone, Serialize)]
pub struct GitHubStats {
    pub total_stars: u64,
    pub total_commits: u64,
    pub total_prs: u32,
    pub total_issues: u32,
    pub contributions_last_year: u32,
    pub current_streak: Option<Streak>,
    pub longest_streak: Option<Streak>,
    pub total_contributions: Option<u64>,
    pub most_used_languages: Vec<LanguageBucket>,
}

/// Everything one profile search produces, in render-ready form.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: GitHubUser,
    pub stats: GitHubStats,
    pub languages: Vec<LanguageBucket>,
    pub top_repositories: TopRepositories,
    pub activity: Vec<ActivityBin>,
    pub heatmap: Heatmap,
    pub generated_at: DateTime<Utc>,
}
