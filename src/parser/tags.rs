//! Struct tag lookups.

use std::sync::LazyLock;

use regex::Regex;

use crate::literal::unquote;

static JSON_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)json:"([^"]*)""#).expect("valid regex"));
static DEFAULT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)default:"([^"]*)""#).expect("valid regex"));
static SHORT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)short:"([^"]*)""#).expect("valid regex"));

/// The decoded text of a field tag such as
/// `` `json:"host,omitempty" default:"localhost"` ``.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    text: String,
}

impl StructTag {
    /// Builds a tag from its Go string literal, raw or interpreted.
    ///
    /// A literal with an invalid escape sequence is read as written.
    pub fn from_literal(literal: &str) -> Self {
        Self::new(unquote(literal).unwrap_or_else(|| {
            log::warn!("Could not decode struct tag {literal}, reading it verbatim");
            literal.to_string()
        }))
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The JSON key, without options like `omitempty`.
    ///
    /// An empty key and the `-` (skip) marker count as no key.
    pub fn json_name(&self) -> Option<&str> {
        let value = self.lookup(&JSON_KEY)?;
        let key = value.split(',').next().unwrap_or_default();
        (!key.is_empty() && key != "-").then_some(key)
    }

    /// The verbatim `default` value.
    pub fn default_value(&self) -> Option<&str> {
        self.lookup(&DEFAULT_KEY)
    }

    /// The verbatim `short` value.
    pub fn short(&self) -> Option<&str> {
        self.lookup(&SHORT_KEY)
    }

    fn lookup(&self, pattern: &Regex) -> Option<&str> {
        pattern
            .captures(&self.text)
            .and_then(|captures| captures.get(1))
            .map(|value| value.as_str())
    }
}
