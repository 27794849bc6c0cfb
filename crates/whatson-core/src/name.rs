//! Container name sanitization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback used when a hub name sanitizes to nothing.
pub const HUB_FALLBACK_NAME: &str = "untitled-hub";

/// Fallback used when a note id sanitizes to nothing.
pub const NOTE_FALLBACK_NAME: &str = "untitled-note";

/// A filesystem-safe container name.
///
/// Only contains characters from `[a-z0-9._-]` and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanitizedName(String);

impl SanitizedName {
    /// Borrow the sanitized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SanitizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for SanitizedName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

/// Sanitize a hub name, falling back to [`HUB_FALLBACK_NAME`].
#[must_use]
pub fn sanitize(name: &str) -> SanitizedName {
    sanitize_or(name, HUB_FALLBACK_NAME)
}

/// Sanitize a name with an explicit fallback for empty results.
///
/// Trims, lower-cases, collapses whitespace runs to a single `-`, then drops
/// every character outside `[a-z0-9._-]`. Names made only of dots map to the
/// fallback as well.
#[must_use]
pub fn sanitize_or(name: &str, fallback: &str) -> SanitizedName {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        if is_allowed(ch) {
            out.push(ch);
        }
    }

    // `.` and `..` would escape the parent directory once joined.
    if out.is_empty() || out.chars().all(|c| c == '.') {
        SanitizedName(fallback.to_string())
    } else {
        SanitizedName(out)
    }
}

const fn is_allowed(ch: char) -> bool {
    matches!(ch, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_name() {
        assert_eq!(sanitize("My Notes!!").as_str(), "my-notes");
        assert_eq!(sanitize("My Hub").as_str(), "my-hub");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(sanitize("  a \t\n b  ").as_str(), "a-b");
    }

    #[test]
    fn test_keeps_dots_and_underscores() {
        assert_eq!(sanitize("Release_2.0").as_str(), "release_2.0");
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(sanitize("").as_str(), HUB_FALLBACK_NAME);
        assert_eq!(sanitize("   ").as_str(), HUB_FALLBACK_NAME);
        assert_eq!(sanitize("!!!").as_str(), HUB_FALLBACK_NAME);
        assert_eq!(sanitize_or("", NOTE_FALLBACK_NAME).as_str(), NOTE_FALLBACK_NAME);
    }

    #[test]
    fn test_non_ascii_is_stripped() {
        assert_eq!(sanitize("Café Über").as_str(), "caf-ber");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "   ",
            "My Notes!!",
            "a  b\tc",
            "--x--",
            "Über/../etc",
            "ünïcödé",
            "a - b",
            "UPPER_case.txt",
        ];

        for input in inputs {
            let once = sanitize(input);
            let twice = sanitize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_dot_only_names_fall_back() {
        assert_eq!(sanitize(".").as_str(), HUB_FALLBACK_NAME);
        assert_eq!(sanitize("..").as_str(), HUB_FALLBACK_NAME);
        assert_eq!(sanitize(" . . ").as_str(), ".-.");
    }

    #[test]
    fn test_path_separators_are_removed() {
        assert_eq!(sanitize("../etc/passwd").as_str(), "..etcpasswd");
        assert_eq!(sanitize(r"a\b").as_str(), "ab");
    }
}
