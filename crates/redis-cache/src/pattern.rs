//! Redis `KEYS`-style glob matching for stores that evaluate patterns
//! locally.
//!
//! Supported syntax: `*`, `?`, `[abc]`, `[a-z]`, `[!a]` / `[^a]` and `\`
//! escapes. Unlike path globs, `*` also crosses `/` and `:`. Braces are
//! literal, as in Redis, so hash-tagged keys like `cfg:{tenant}:*` match.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{CacheError, Result};

/// A compiled key pattern.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    matcher: GlobMatcher,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(&escape_braces(pattern))
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| CacheError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;

        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }
}

/// Rewrite `{` and `}` outside classes as one-character classes so globset
/// does not read them as alternation.
fn escape_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    // Members seen in the current class; a leading `]` is a member, not the end
    let mut members = 0;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                    members += 1;
                }
            }
            '[' if !in_class => {
                in_class = true;
                members = 0;
                out.push(c);
            }
            '!' | '^' if in_class && members == 0 => out.push(c),
            ']' if in_class && members > 0 => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => {
                members += 1;
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matches(pattern: &str, key: &str) -> bool {
        KeyPattern::new(pattern).unwrap().matches(key)
    }

    #[test]
    fn test_star() {
        assert!(matches("user:*", "user:1"));
        assert!(matches("user:*", "user:"));
        assert!(matches("user:*", "user:1:profile"));
        assert!(matches("*", "anything/at:all"));
        assert!(!matches("user:*", "session:1"));
    }

    #[test]
    fn test_question_mark() {
        assert!(matches("h?llo", "hello"));
        assert!(matches("h?llo", "hallo"));
        assert!(!matches("h?llo", "hllo"));
    }

    #[test]
    fn test_classes() {
        assert!(matches("h[ae]llo", "hello"));
        assert!(!matches("h[ae]llo", "hillo"));
        assert!(matches("h[!e]llo", "hallo"));
        assert!(!matches("h[^e]llo", "hello"));
        assert!(matches("key:[0-9]", "key:7"));
        assert!(!matches("key:[0-9]", "key:x"));
    }

    #[test]
    fn test_escape() {
        assert!(matches(r"literal\*", "literal*"));
        assert!(!matches(r"literal\*", "literally"));
    }

    #[test]
    fn test_braces_are_literal() {
        assert!(matches("cfg:{tenant}:*", "cfg:{tenant}:1"));
        assert!(!matches("cfg:{tenant}:*", "cfg:tenant:1"));
        assert!(matches("cfg:{*", "cfg:{tenant}:1"));
        assert!(matches("{a,b}", "{a,b}"));
        assert!(!matches("{a,b}", "a"));
        assert!(matches(r"cfg:\{tenant\}:*", "cfg:{tenant}:1"));
        assert!(matches("cfg:[{]*", "cfg:{x"));
    }

    #[test]
    fn test_escape_braces_leaves_classes_alone() {
        assert_eq!(escape_braces("a{b}"), "a[{]b[}]");
        assert_eq!(escape_braces("[{}]x{"), "[{}]x[{]");
        assert_eq!(escape_braces("[]{]{"), "[]{][{]");
        assert_eq!(escape_braces(r"\{"), r"\{");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = KeyPattern::new("user:[").unwrap_err();
        assert!(matches!(err, CacheError::InvalidPattern { .. }));
    }

    proptest! {
        #[test]
        fn prop_literal_matches_only_itself(key in "[a-zA-Z0-9:_]{1,32}", other in "[a-zA-Z0-9:_]{1,32}") {
            let pattern = KeyPattern::new(&key).unwrap();
            prop_assert!(pattern.matches(&key));
            prop_assert_eq!(pattern.matches(&other), key == other);
        }

        #[test]
        fn prop_prefix_star_is_starts_with(prefix in "[a-z:]{0,12}", key in "[a-z:0-9]{0,24}") {
            let pattern = KeyPattern::new(&format!("{prefix}*")).unwrap();
            prop_assert_eq!(pattern.matches(&key), key.starts_with(&prefix));
        }
    }
}
