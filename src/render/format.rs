//! Display formatting for counts and durations

use regex::Regex;
use std::sync::OnceLock;

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]").expect("static regex"))
}

/// Format a raw view count ("1,234,567 views") as "1.2M views".
///
/// One decimal is kept and exact ties round to even, so 1,250 views
/// reads "1.2K views". Input without any digits is returned unchanged.
pub fn format_views(raw: &str) -> String {
    let digits = non_digits().replace_all(raw, "");
    let views: u64 = match digits.parse() {
        Ok(views) => views,
        Err(_) => return raw.to_string(),
    };

    if views >= 1_000_000 {
        format!("{:.1}M views", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.1}K views", views as f64 / 1_000.0)
    } else {
        format!("{} views", views)
    }
}

/// Format a length in seconds as `M:SS`; minutes are not wrapped into hours
pub fn format_length(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
