//! Shared utilities (wall clock, escape-sequence stripping).

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

pub fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn escape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]")
            .unwrap_or_else(|e| panic!("escape pattern: {e}"))
    })
}

/// Remove terminal escape sequences, leaving the plain text.
pub fn strip_ansi(text: &str) -> String {
    escape_pattern().replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_colour_codes() {
        let raw = "\x1b[38;5;246m# list files\x1b[0m\n\x1b[1mls\x1b[22m -la";
        assert_eq!(strip_ansi(raw), "# list files\nls -la");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(strip_ansi("tar -xvf a.tar"), "tar -xvf a.tar");
    }

    #[test]
    fn clock_is_past_2020() {
        assert!(now_epoch_ms() > 1_577_836_800_000);
    }
}
