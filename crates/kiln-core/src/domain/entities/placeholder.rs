//! `{{TOKEN}}` placeholder substitution.
//!
//! Substitution is a single left-to-right pass over the input: replacement
//! values are emitted verbatim and never rescanned, so a value that itself
//! looks like a token is not expanded.

use std::collections::BTreeMap;

use crate::domain::{DomainError, ProjectName};

/// Key substituted with the project name in generated docs.
pub const PROJECT_NAME_KEY: &str = "PROJECT_NAME";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Token name → replacement text. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: BTreeMap<String, String>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map every generated project gets: `{PROJECT_NAME: name}`.
    pub fn for_project(name: &ProjectName) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PROJECT_NAME_KEY.to_string(), name.as_str().to_string());
        Self { entries }
    }

    /// Insert a key, returning the previous value if there was one.
    ///
    /// Keys must be non-empty and free of whitespace and braces, since the
    /// token syntax has no escaping.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, DomainError> {
        let key = key.into();
        if key.is_empty()
            || key
                .chars()
                .any(|c| c.is_whitespace() || c == '{' || c == '}')
        {
            return Err(DomainError::InvalidPlaceholderKey { key });
        }
        Ok(self.entries.insert(key, value.into()))
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Replace every `{{KEY}}` in `text` whose key is in the map.
    ///
    /// Unknown tokens and everything outside tokens are copied byte for byte.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];

            let replacement = after_open
                .find(CLOSE)
                .and_then(|end| self.entries.get(&after_open[..end]).map(|v| (end, v)));

            match replacement {
                Some((end, value)) => {
                    out.push_str(value);
                    rest = &after_open[end + CLOSE.len()..];
                }
                None => {
                    // Advance one brace so "{{{KEY}}}" still finds "{{KEY}}".
                    out.push('{');
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Token names still present in `text`, in order of appearance.
///
/// Used to verify generated docs are fully substituted.
pub fn find_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        match after_open.find(CLOSE) {
            Some(end) => {
                tokens.push(&after_open[..end]);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => break,
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> PlaceholderMap {
        pairs
            .iter()
            .fold(PlaceholderMap::new(), |m, (k, v)| m.with(*k, *v).unwrap())
    }

    #[test]
    fn replaces_every_occurrence() {
        let m = map(&[("PROJECT_NAME", "my-api")]);
        let out = m.apply("# {{PROJECT_NAME}}\n\ncd {{PROJECT_NAME}} && npm start\n");
        assert_eq!(out, "# my-api\n\ncd my-api && npm start\n");
    }

    #[test]
    fn leaves_other_text_byte_identical() {
        let m = map(&[("PROJECT_NAME", "x")]);
        let text = "héllo { } {{ }} }} {{ PROJECT_NAME }} `{{OTHER}}`\r\n\ttrailing";
        assert_eq!(m.apply(text), text);
    }

    #[test]
    fn does_not_tolerate_whitespace_inside_braces() {
        let m = map(&[("PROJECT_NAME", "x")]);
        assert_eq!(m.apply("{{ PROJECT_NAME }}"), "{{ PROJECT_NAME }}");
    }

    #[test]
    fn values_are_not_re_expanded() {
        let m = map(&[("A", "{{B}}"), ("B", "boom")]);
        assert_eq!(m.apply("{{A}} {{B}}"), "{{B}} boom");
    }

    #[test]
    fn values_are_not_re_expanded_regardless_of_key_order() {
        let m = map(&[("A", "done"), ("Z", "{{A}}")]);
        assert_eq!(m.apply("{{Z}}"), "{{A}}");
    }

    #[test]
    fn extra_leading_brace_is_preserved() {
        let m = map(&[("PROJECT_NAME", "api")]);
        assert_eq!(m.apply("{{{PROJECT_NAME}}}"), "{api}");
    }

    #[test]
    fn unterminated_token_is_copied() {
        let m = map(&[("PROJECT_NAME", "api")]);
        assert_eq!(m.apply("start {{PROJECT_NAME"), "start {{PROJECT_NAME");
    }

    #[test]
    fn empty_map_is_identity() {
        let text = "{{PROJECT_NAME}}";
        assert_eq!(PlaceholderMap::new().apply(text), text);
    }

    #[test]
    fn invalid_keys_are_rejected() {
        let mut m = PlaceholderMap::new();
        assert!(m.insert("", "v").is_err());
        assert!(m.insert("HAS SPACE", "v").is_err());
        assert!(m.insert("{NESTED}", "v").is_err());
        assert!(m.is_empty());
    }

    #[test]
    fn insert_replaces_existing_key() {
        let mut m = PlaceholderMap::new();
        assert_eq!(m.insert("K", "1").unwrap(), None);
        assert_eq!(m.insert("K", "2").unwrap(), Some("1".to_string()));
        assert_eq!(m.get("K"), Some("2"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn for_project_uses_project_name_key() {
        let name = ProjectName::parse("my-api").unwrap();
        let m = PlaceholderMap::for_project(&name);
        assert_eq!(m.get(PROJECT_NAME_KEY), Some("my-api"));
    }

    #[test]
    fn find_tokens_lists_remaining_tokens() {
        assert_eq!(find_tokens("a {{X}} b {{Y_2}}"), vec!["X", "Y_2"]);
        assert!(find_tokens("no tokens { here }").is_empty());
    }
}
