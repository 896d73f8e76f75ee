//! Namespaced string identifiers, used for planets, dimensions & data records

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The namespace everything shipped with this server lives under
pub const ASTRUM_NAMESPACE: &str = "astrum";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// An identifier of the form `namespace:path`.
///
/// Both segments are restricted to lowercase ascii, digits and `_ - .`
/// (the path additionally allows `/`). Identifiers are cheap to clone and
/// compare, and serialize as the plain `namespace:path` string.
pub struct NamespacedId {
    namespace: String,
    path: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Why a string could not be interpreted as a [`NamespacedId`]
pub enum IdParseError {
    /// There was no `:` between the namespace and the path
    #[error("missing `:` separator in identifier `{0}`")]
    MissingSeparator(String),
    /// The namespace or path contained a character outside the allowed set
    #[error("invalid character `{1}` in identifier `{0}`")]
    InvalidCharacter(String, char),
    /// The namespace or path was empty
    #[error("empty segment in identifier `{0}`")]
    EmptySegment(String),
}

fn valid_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl NamespacedId {
    /// Creates an identifier from segments known to be valid.
    ///
    /// Panics on invalid segments, so only use this with literals; parse
    /// untrusted input with [`NamespacedId::parse`] instead.
    pub fn new(namespace: &str, path: &str) -> Self {
        Self::parse(&format!("{namespace}:{path}")).expect("invalid identifier literal")
    }

    /// Shorthand for an identifier in the [`ASTRUM_NAMESPACE`]
    pub fn astrum(path: &str) -> Self {
        Self::new(ASTRUM_NAMESPACE, path)
    }

    /// Parses a `namespace:path` string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let Some((namespace, path)) = s.split_once(':') else {
            return Err(IdParseError::MissingSeparator(s.to_owned()));
        };

        if namespace.is_empty() || path.is_empty() {
            return Err(IdParseError::EmptySegment(s.to_owned()));
        }

        if let Some(c) = namespace.chars().find(|c| !valid_namespace_char(*c)) {
            return Err(IdParseError::InvalidCharacter(s.to_owned(), c));
        }

        if let Some(c) = path.chars().find(|c| !valid_path_char(*c)) {
            return Err(IdParseError::InvalidCharacter(s.to_owned(), c));
        }

        Ok(Self {
            namespace: namespace.to_owned(),
            path: path.to_owned(),
        })
    }

    /// The part before the `:`
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The part after the `:`
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl Serialize for NamespacedId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NamespacedId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_ids() {
        let id = NamespacedId::parse("astrum:mars").expect("should parse");
        assert_eq!(id.namespace(), "astrum");
        assert_eq!(id.path(), "mars");
        assert_eq!(id.to_string(), "astrum:mars");
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            NamespacedId::parse("mars"),
            Err(IdParseError::MissingSeparator("mars".into()))
        );
    }

    #[test]
    fn rejects_bad_characters() {
        assert!(matches!(
            NamespacedId::parse("astrum:Mars"),
            Err(IdParseError::InvalidCharacter(_, 'M'))
        ));
        assert!(matches!(
            NamespacedId::parse("bad ns:mars"),
            Err(IdParseError::InvalidCharacter(_, ' '))
        ));
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(matches!(NamespacedId::parse(":mars"), Err(IdParseError::EmptySegment(_))));
        assert!(matches!(NamespacedId::parse("astrum:"), Err(IdParseError::EmptySegment(_))));
    }
}
