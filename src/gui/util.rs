//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use std::path::PathBuf;

/// Turn whatever the user typed/pasted into a path.
/// Trims whitespace and one pair of surrounding quotes (file managers add them).
pub(crate) fn parse_folder_input(s: &str) -> Option<PathBuf> {
    let s = s.trim();
    let s = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
        .trim();

    if s.is_empty() {
        None
    } else {
        Some(PathBuf::from(s))
    }
}

/// `m:ss` for a millisecond count.
pub(crate) fn fmt_ms(ms: u64) -> String {
    let s = ms / 1000;
    let m = s / 60;
    let s = s % 60;
    format!("{m}:{s:02}")
}

/// Shown next to "Year:" when the tag has none.
pub(crate) fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_input_trims_quotes_and_space() {
        assert_eq!(
            parse_folder_input("  \"/home/me/Music\" "),
            Some(PathBuf::from("/home/me/Music"))
        );
        assert_eq!(parse_folder_input("/tmp"), Some(PathBuf::from("/tmp")));
        assert_eq!(parse_folder_input("   "), None);
        assert_eq!(parse_folder_input("\"\""), None);
    }

    #[test]
    fn fmt_ms_pads_seconds() {
        assert_eq!(fmt_ms(0), "0:00");
        assert_eq!(fmt_ms(65_400), "1:05");
        assert_eq!(fmt_ms(3_600_000), "60:00");
    }

    #[test]
    fn year_label_placeholder() {
        assert_eq!(year_label(Some(1994)), "1994");
        assert_eq!(year_label(None), "-");
    }
}
