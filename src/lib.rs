pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod palette;
pub mod pipeline;
pub mod stats;

pub use config::{Config, DashboardOptions};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use pipeline::StatsPipeline;
