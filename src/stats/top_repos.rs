use crate::models::{Repository, TopRepositories};

/// The `limit` highest-starred repositories as parallel star/fork series,
/// descending. Equal star counts keep input order; a limit of zero yields
/// empty series and a limit past the input length yields everything.
pub fn top_repositories(repos: &[Repository], limit: usize) -> TopRepositories {
    let mut ranked: Vec<&Repository> = repos.iter().collect();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.truncate(limit);

    TopRepositories {
        labels: ranked.iter().map(|r| r.name.clone()).collect(),
        stars: ranked.iter().map(|r| r.stargazers_count).collect(),
        forks: ranked.iter().map(|r| r.forks_count).collect(),
    }
}
