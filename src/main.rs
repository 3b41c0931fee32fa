use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitinsight::models::{Dashboard, Streak};
use gitinsight::{Config, DashboardOptions, GitHubClient, StatsPipeline};

#[derive(Parser, Debug)]
#[command(name = "gitinsight")]
#[command(version = "0.1.0")]
#[command(about = "GitHub profile dashboard: language, repository and contribution stats")]
struct Args {
    /// GitHub username to look up
    #[arg(short, long)]
    username: String,

    /// Output format (text, json, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Trailing months covered by the contribution activity chart
    #[arg(long, default_value = "6")]
    months: u32,

    /// How many repositories the top-repository chart keeps
    #[arg(long, default_value = "5")]
    top: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitinsight=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = Config::from_env()?;
    let github = GitHubClient::new(&config)?;
    let pipeline = StatsPipeline::new(
        github,
        DashboardOptions {
            months: args.months,
            top_repo_limit: args.top,
        },
    );

    tracing::info!("Building dashboard for GitHub user: {}", args.username);
    let dashboard = pipeline.build_dashboard(&args.username).await?;

    output_dashboard(&dashboard, &args)?;

    Ok(())
}

fn output_dashboard(dashboard: &Dashboard, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(dashboard)?,
        "markdown" => format_markdown(dashboard),
        _ => format_text(dashboard),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn streak_line(streak: &Option<Streak>) -> String {
    match streak {
        Some(s) => format!("{} days ({} - {})", s.count, s.start, s.end),
        None => "unavailable".to_string(),
    }
}

fn format_text(dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let user = &dashboard.user;
    let stats = &dashboard.stats;

    output.push_str(&format!("\n=== GitHub Stats: {} ===\n\n", user.login));

    if let Some(ref name) = user.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    if let Some(ref location) = user.location {
        output.push_str(&format!("Location: {}\n", location));
    }
    output.push_str(&format!(
        "Followers: {} | Following: {} | Public repos: {}\n",
        user.followers, user.following, user.public_repos
    ));
    output.push_str(&format!(
        "Member since: {}\n\n",
        user.created_at.format("%Y-%m-%d")
    ));

    output.push_str("Stats:\n");
    output.push_str(&format!("  Total stars: {}\n", stats.total_stars));
    output.push_str(&format!("  Commits (recent feed): {}\n", stats.total_commits));
    output.push_str(&format!("  Pull requests: {}\n", stats.total_prs));
    output.push_str(&format!("  Issues: {}\n", stats.total_issues));
    output.push_str(&format!(
        "  Events last year: {}\n",
        stats.contributions_last_year
    ));
    output.push_str(&format!(
        "  Current streak: {}\n",
        streak_line(&stats.current_streak)
    ));
    output.push_str(&format!(
        "  Longest streak: {}\n",
        streak_line(&stats.longest_streak)
    ));

    if !stats.most_used_languages.is_empty() {
        output.push_str("\nMost Used Languages:\n");
        for bucket in &stats.most_used_languages {
            output.push_str(&format!(
                "  - {}: {:.2}% ({} repos)\n",
                bucket.name, bucket.percentage, bucket.count
            ));
        }
    }

    if !dashboard.top_repositories.is_empty() {
        output.push_str("\nTop Repositories:\n");
        let top = &dashboard.top_repositories;
        for (i, label) in top.labels.iter().enumerate() {
            output.push_str(&format!(
                "  {} (stars: {}, forks: {})\n",
                label, top.stars[i], top.forks[i]
            ));
        }
    }

    output.push_str("\nContribution Activity:\n");
    for bin in &dashboard.activity {
        output.push_str(&format!("  {}: {}\n", bin.label, bin.count));
    }

    output.push_str("\nContribution Heatmap:\n");
    output.push_str(&format_heatmap(dashboard));

    output.push_str(&format!(
        "\nGenerated at: {}\n",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

/// Renders the heat-map as one label row plus seven weekday rows, weeks as
/// columns, one block glyph per day.
fn format_heatmap(dashboard: &Dashboard) -> String {
    const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

    let heatmap = &dashboard.heatmap;
    let mut output = String::new();

    let mut label_row = vec![' '; heatmap.weeks.len() * 2];
    for month in &heatmap.month_labels {
        for (i, c) in month.label.chars().enumerate() {
            let column = month.week * 2 + i;
            if column < label_row.len() {
                label_row[column] = c;
            }
        }
    }
    output.push_str("  ");
    output.extend(label_row);
    output.push('\n');

    for weekday in 0..7 {
        output.push_str("  ");
        for week in &heatmap.weeks {
            match week.get(weekday) {
                Some(day) => {
                    output.push(LEVEL_GLYPHS[usize::from(day.level)]);
                    output.push(' ');
                }
                None => output.push_str("  "),
            }
        }
        output.push('\n');
    }

    output
}

fn format_markdown(dashboard: &Dashboard) -> String {
    let mut output = String::new();
    let user = &dashboard.user;
    let stats = &dashboard.stats;

    output.push_str(&format!("# GitHub Stats: {}\n\n", user.login));

    if let Some(ref name) = user.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Total Stars | {} |\n", stats.total_stars));
    output.push_str(&format!("| Commits (recent feed) | {} |\n", stats.total_commits));
    output.push_str(&format!("| Pull Requests | {} |\n", stats.total_prs));
    output.push_str(&format!("| Issues | {} |\n", stats.total_issues));
    output.push_str(&format!(
        "| Events Last Year | {} |\n",
        stats.contributions_last_year
    ));
    output.push_str(&format!(
        "| Current Streak | {} |\n",
        streak_line(&stats.current_streak)
    ));
    output.push_str(&format!(
        "| Longest Streak | {} |\n",
        streak_line(&stats.longest_streak)
    ));

    if !stats.most_used_languages.is_empty() {
        output.push_str("\n## Most Used Languages\n\n");
        output.push_str("| Language | Repositories | Share |\n");
        output.push_str("|----------|--------------|-------|\n");
        for bucket in &stats.most_used_languages {
            output.push_str(&format!(
                "| {} | {} | {:.2}% |\n",
                bucket.name, bucket.count, bucket.percentage
            ));
        }
    }

    if !dashboard.top_repositories.is_empty() {
        output.push_str("\n## Top Repositories\n\n");
        output.push_str("| Repository | Stars | Forks |\n");
        output.push_str("|------------|-------|-------|\n");
        let top = &dashboard.top_repositories;
        for (i, label) in top.labels.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                label, top.stars[i], top.forks[i]
            ));
        }
    }

    output.push_str("\n## Contribution Activity\n\n");
    output.push_str("| Month | Contributions |\n|-------|---------------|\n");
    for bin in &dashboard.activity {
        output.push_str(&format!("| {} | {} |\n", bin.label, bin.count));
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
