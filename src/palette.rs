//! Static color tables shared by the aggregators and renderers.

/// Fallback for languages without an assigned color.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#8E9196";

/// Heat-map cell colors, indexed by activity level 0 through 4.
pub const ACTIVITY_LEVEL_COLORS: [&str; 5] =
    ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"];

/// GitHub's conventional color for a language, defaulting to gray for
/// anything not in the table.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "C#" => "#178600",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "Go" => "#00ADD8",
        "Swift" => "#ffac45",
        "Kotlin" => "#A97BFF",
        "Rust" => "#dea584",
        "Dart" => "#00B4AB",
        "Shell" => "#89e051",
        "Jupyter Notebook" => "#DA5B0B",
        "Batchfile" => "#C1F12E",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}
