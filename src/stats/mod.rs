pub mod activity;
pub mod heatmap;
pub mod languages;
pub mod summary;
pub mod top_repos;

pub use activity::contribution_activity;
pub use heatmap::contribution_heatmap;
pub use languages::{language_distribution, most_used_languages};
pub use summary::github_stats;
pub use top_repos::top_repositories;
