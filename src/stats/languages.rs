use std::collections::HashMap;

use crate::models::{LanguageBucket, Repository};
use crate::palette::{language_color, DEFAULT_LANGUAGE_COLOR};

/// Named slices kept before the remainder collapses into `Others`.
const DISTRIBUTION_CAP: usize = 8;

/// Languages shown on the stats card.
const MOST_USED_CAP: usize = 6;

/// Language distribution for the pie chart: up to 8 named buckets ranked by
/// repository count, plus an `Others` bucket when more languages exist.
///
/// Repositories without a primary language are excluded entirely, including
/// from the percentage denominator. Equal counts keep first-encountered
/// input order, so the ranking is deterministic for any input permutation
/// that preserves first appearances.
pub fn language_distribution(repos: &[Repository]) -> Vec<LanguageBucket> {
    let ranked = ranked_language_counts(repos);
    let total: u32 = ranked.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<LanguageBucket> = ranked
        .iter()
        .take(DISTRIBUTION_CAP)
        .map(|(name, count)| bucket(name, *count, total))
        .collect();

    let others: u32 = ranked
        .iter()
        .skip(DISTRIBUTION_CAP)
        .map(|(_, count)| count)
        .sum();
    if others > 0 {
        buckets.push(LanguageBucket {
            name: "Others".to_string(),
            count: others,
            percentage: round2(f64::from(others) / f64::from(total) * 100.0),
            color: DEFAULT_LANGUAGE_COLOR,
        });
    }

    buckets
}

/// Top languages for the stats card: the full, uncapped ranking cut to 6.
/// Recomputed from the repository list rather than reusing the capped
/// distribution, so an `Others` remainder never leaks into the card.
pub fn most_used_languages(repos: &[Repository]) -> Vec<LanguageBucket> {
    let ranked = ranked_language_counts(repos);
    let total: u32 = ranked.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Vec::new();
    }

    ranked
        .iter()
        .take(MOST_USED_CAP)
        .map(|(name, count)| bucket(name, *count, total))
        .collect()
}

/// Languages with their repository counts, descending, ties in
/// first-encountered order.
fn ranked_language_counts(repos: &[Repository]) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for repo in repos {
        if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            let entry = counts.entry(language).or_insert(0);
            if *entry == 0 {
                order.push(language);
            }
            *entry += 1;
        }
    }

    let mut ranked: Vec<(String, u32)> = order
        .into_iter()
        .map(|name| (name.to_string(), counts[name]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn bucket(name: &str, count: u32, total: u32) -> LanguageBucket {
    LanguageBucket {
        name: name.to_string(),
        count,
        percentage: round2(f64::from(count) / f64::from(total) * 100.0),
        color: language_color(name),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
