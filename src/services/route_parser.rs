use regex::Regex;
use std::sync::OnceLock;

fn numbered_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^\s*\d+\.\s(.+)$").expect("valid route pattern"))
}

/// Pulls the stop names out of the numbered lines of a generated route, in
/// the order they appear. Anything else in the text is ignored.
pub fn parse_points_of_interest(generated_route: &str) -> Vec<String> {
    numbered_line()
        .captures_iter(generated_route)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().trim().to_string())
        .collect()
}
