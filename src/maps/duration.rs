//! Route duration parsing
//!
//! The routes API reports durations as a count of seconds with an `s`
//! suffix, e.g. `"2714s"`.

use regex::Regex;
use std::sync::OnceLock;

fn leading_digits() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"^(\d+)s").expect("valid duration regex"))
}

/// Convert a `"<seconds>s"` duration to whole minutes, rounding to nearest
pub fn parse_duration_minutes(duration: &str) -> Option<u32> {
    let captures = leading_digits().captures(duration.trim())?;
    let seconds: u64 = captures.get(1)?.as_str().parse().ok()?;
    let minutes = seconds.saturating_add(30) / 60;
    u32::try_from(minutes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration_minutes("2714s"), Some(45));
        assert_eq!(parse_duration_minutes("5400s"), Some(90));
        assert_eq!(parse_duration_minutes("0s"), Some(0));
    }

    #[test]
    fn test_rounds_to_nearest_minute() {
        assert_eq!(parse_duration_minutes("89s"), Some(1));
        assert_eq!(parse_duration_minutes("90s"), Some(2));
        assert_eq!(parse_duration_minutes("29s"), Some(0));
    }

    #[test]
    fn test_non_conforming_input() {
        assert_eq!(parse_duration_minutes(""), None);
        assert_eq!(parse_duration_minutes("1200"), None);
        assert_eq!(parse_duration_minutes("abc"), None);
        assert_eq!(parse_duration_minutes("-60s"), None);
        assert_eq!(parse_duration_minutes("99999999999999999999999s"), None);
    }
}
