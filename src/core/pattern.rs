//! Key reference patterns.
//!
//! Keys are discovered by matching quoted string literals of the shape
//! `"<namespace>:<key.body>"` in source files and `"%<namespace>:<key.body>"`
//! in UI-definition files. This is a text scan, not a parse: any literal with
//! the right shape counts as a reference.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use regex::Regex;

/// Characters allowed in a key body, followed by the final character which
/// may not be a dot.
const KEY_BODY: &str = r"[A-Za-z0-9_.\-]*[A-Za-z0-9_\-]";

/// Literals ending in this suffix are asset paths, not translation keys.
const EXCLUDED_SUFFIX: &str = ".png";

/// Marker that flags a markup string as a translation reference.
pub const UI_MARKER: &str = "%";

/// One compiled key reference pattern.
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    regex: Regex,
}

impl KeyMatcher {
    fn new(namespace: &str, marker: &str) -> Result<Self> {
        let pattern = format!(
            r#""{}({}:{})""#,
            regex::escape(marker),
            regex::escape(namespace),
            KEY_BODY
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Failed to compile key pattern for '{}'", namespace))?;
        Ok(Self { regex })
    }

    /// Collect every referenced key in `text` into `keys`.
    ///
    /// Matches never overlap. A literal ending in `.png` is rejected and the
    /// search resumes right after its opening quote, so the rejected text can
    /// still take part in a later match.
    pub fn collect_into(&self, text: &str, keys: &mut HashSet<String>) {
        let mut start = 0;
        while start <= text.len() {
            let Some(caps) = self.regex.captures_at(text, start) else {
                break;
            };
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            if key.as_str().ends_with(EXCLUDED_SUFFIX) {
                // The opening quote is a single byte, so this stays on a char boundary.
                start = whole.start() + 1;
                continue;
            }

            keys.insert(key.as_str().to_string());
            start = whole.end();
        }
    }

    /// All keys referenced in `text`.
    pub fn find_keys(&self, text: &str) -> HashSet<String> {
        let mut keys = HashSet::new();
        self.collect_into(text, &mut keys);
        keys
    }
}

/// The pair of matchers for one namespace.
#[derive(Debug, Clone)]
pub struct KeyPatterns {
    /// Plain quoted literals, applied to general source files.
    pub source: KeyMatcher,
    /// `%`-prefixed literals, applied to UI-definition files.
    pub ui: KeyMatcher,
}

impl KeyPatterns {
    /// Compile both matchers for `namespace`.
    ///
    /// The namespace is treated as literal text, never as pattern syntax.
    pub fn new(namespace: &str) -> Result<Self> {
        if namespace.is_empty() {
            bail!("Namespace identifier must not be empty");
        }

        Ok(Self {
            source: KeyMatcher::new(namespace, "")?,
            ui: KeyMatcher::new(namespace, UI_MARKER)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sorted(keys: HashSet<String>) -> Vec<String> {
        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_source_matcher_captures_namespaced_key() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns
            .source
            .find_keys(r#"label.setText(Translations.get("ns:menu.title"));"#);

        assert_eq!(sorted(keys), vec!["ns:menu.title"]);
    }

    #[test]
    fn test_png_literal_is_excluded() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns
            .source
            .find_keys(r#"new Image("ns:icon.png"); get("ns:icon.label");"#);

        assert_eq!(sorted(keys), vec!["ns:icon.label"]);
    }

    #[test]
    fn test_png_in_the_middle_is_allowed() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns.source.find_keys(r#""ns:icon.png.alt""#);

        assert_eq!(sorted(keys), vec!["ns:icon.png.alt"]);
    }

    #[test]
    fn test_rejected_literal_does_not_swallow_following_key() {
        let patterns = KeyPatterns::new("ns").unwrap();
        // The closing quote of the asset path opens the next key literal.
        let keys = patterns.source.find_keys(r#""ns:logo.png"ns:next.key""#);

        assert_eq!(sorted(keys), vec!["ns:next.key"]);
    }

    #[test]
    fn test_multiple_keys_per_file() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let text = r#"
            a("ns:first");
            b("ns:second_key", "ns:third-key");
            c("ns:first");
        "#;

        assert_eq!(
            sorted(patterns.source.find_keys(text)),
            vec!["ns:first", "ns:second_key", "ns:third-key"]
        );
    }

    #[test]
    fn test_other_namespace_is_ignored() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns
            .source
            .find_keys(r#"get("other:title"); get("xns:title"); get("ns:title")"#);

        assert_eq!(sorted(keys), vec!["ns:title"]);
    }

    #[test]
    fn test_trailing_dot_and_invalid_characters_do_not_match() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns
            .source
            .find_keys(r#"get("ns:title."); get("ns:has space"); get("ns:")"#);

        assert!(keys.is_empty());
    }

    #[test]
    fn test_single_character_key_body() {
        let patterns = KeyPatterns::new("ns").unwrap();
        assert_eq!(sorted(patterns.source.find_keys(r#""ns:a""#)), vec!["ns:a"]);
    }

    #[test]
    fn test_ui_matcher_requires_marker() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let text = r#"<Label text="%ns:farewell"/><Label text="ns:plain"/>"#;

        assert_eq!(sorted(patterns.ui.find_keys(text)), vec!["ns:farewell"]);
        assert_eq!(sorted(patterns.source.find_keys(text)), vec!["ns:plain"]);
    }

    #[test]
    fn test_ui_matcher_excludes_png() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns.ui.find_keys(r#"<Image url="%ns:img.png"/>"#);

        assert!(keys.is_empty());
    }

    #[test]
    fn test_namespace_is_escaped() {
        let patterns = KeyPatterns::new("org.app+x").unwrap();
        let text = r#""org.app+x:title" "orgXapp+x:title" "org.appx:title""#;

        assert_eq!(
            sorted(patterns.source.find_keys(text)),
            vec!["org.app+x:title"]
        );
    }

    #[test]
    fn test_empty_namespace_is_rejected() {
        assert!(KeyPatterns::new("").is_err());
    }

    #[test]
    fn test_non_ascii_text_around_keys() {
        let patterns = KeyPatterns::new("ns").unwrap();
        let keys = patterns
            .source
            .find_keys("// ünïcödé \"ns:grüße\" \"ns:hello\" 你好");

        assert_eq!(sorted(keys), vec!["ns:hello"]);
    }
}
