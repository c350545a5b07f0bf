//! String matching for parameter guards.
//!
//! - [`StringMatch`] = runtime matcher applied to a captured parameter
//! - [`StringMatchSpec`] = what a route table says (compiles to `StringMatch`)

use crate::RouterError;
use std::fmt;

/// Runtime string matcher with optional ASCII case-insensitivity.
///
/// # Example
///
/// ```
/// use waypost::StringMatch;
///
/// let m = StringMatch::prefix("user-", false);
/// assert!(m.matches("user-42"));
/// assert!(!m.matches("admin"));
///
/// let m = StringMatch::regex(r"^\d+$").unwrap();
/// assert!(m.matches("42"));
/// assert!(!m.matches("4x2"));
/// ```
#[derive(Debug, Clone)]
pub enum StringMatch {
    /// Exact string equality.
    Exact { value: String, ignore_case: bool },
    /// String prefix match.
    Prefix { value: String, ignore_case: bool },
    /// String suffix match.
    Suffix { value: String, ignore_case: bool },
    /// Substring match.
    Contains { value: String, ignore_case: bool },
    /// Regular expression match (linear time).
    Regex(regex::Regex),
}

impl StringMatch {
    /// Create an exact match.
    #[must_use]
    pub fn exact(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Exact {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a prefix match.
    #[must_use]
    pub fn prefix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Prefix {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a suffix match.
    #[must_use]
    pub fn suffix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Suffix {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a contains match.
    ///
    /// With `ignore_case` the needle is lowercased once, here.
    #[must_use]
    pub fn contains(value: impl Into<String>, ignore_case: bool) -> Self {
        let value = value.into();
        Self::Contains {
            value: if ignore_case {
                value.to_ascii_lowercase()
            } else {
                value
            },
            ignore_case,
        }
    }

    /// Create a regex match.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the regex does not compile.
    pub fn regex(pattern: &str) -> Result<Self, RouterError> {
        regex::Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|e| RouterError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Test `input` against this matcher.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Self::Exact { value, ignore_case } => {
                if *ignore_case {
                    input.eq_ignore_ascii_case(value)
                } else {
                    input == value
                }
            }
            Self::Prefix { value, ignore_case } => {
                if *ignore_case {
                    input
                        .get(..value.len())
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(value))
                } else {
                    input.starts_with(value.as_str())
                }
            }
            Self::Suffix { value, ignore_case } => {
                if *ignore_case {
                    input
                        .len()
                        .checked_sub(value.len())
                        .and_then(|start| input.get(start..))
                        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(value))
                } else {
                    input.ends_with(value.as_str())
                }
            }
            Self::Contains { value, ignore_case } => {
                if *ignore_case {
                    input.to_ascii_lowercase().contains(value.as_str())
                } else {
                    input.contains(value.as_str())
                }
            }
            Self::Regex(re) => re.is_match(input),
        }
    }
}

impl fmt::Display for StringMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact { value, .. } => write!(f, "exact(\"{value}\")"),
            Self::Prefix { value, .. } => write!(f, "prefix(\"{value}\")"),
            Self::Suffix { value, .. } => write!(f, "suffix(\"{value}\")"),
            Self::Contains { value, .. } => write!(f, "contains(\"{value}\")"),
            Self::Regex(re) => write!(f, "regex(\"{}\")", re.as_str()),
        }
    }
}

/// A string match as written in a route table.
///
/// ```yaml
/// value_match: { exact: "42" }
/// value_match: { regex: "^[0-9]+$" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum StringMatchSpec {
    /// Exact string equality.
    Exact(String),
    /// String starts with prefix.
    Prefix(String),
    /// String ends with suffix.
    Suffix(String),
    /// String contains substring.
    Contains(String),
    /// Regular expression.
    Regex(String),
}

impl StringMatchSpec {
    /// Compile into a runtime [`StringMatch`].
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the regex is invalid.
    pub fn compile(&self) -> Result<StringMatch, RouterError> {
        match self {
            Self::Exact(v) => Ok(StringMatch::exact(v.as_str(), false)),
            Self::Prefix(v) => Ok(StringMatch::prefix(v.as_str(), false)),
            Self::Suffix(v) => Ok(StringMatch::suffix(v.as_str(), false)),
            Self::Contains(v) => Ok(StringMatch::contains(v.as_str(), false)),
            Self::Regex(v) => StringMatch::regex(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_is_case_sensitive_unless_asked() {
        assert!(StringMatch::exact("Home", false).matches("Home"));
        assert!(!StringMatch::exact("Home", false).matches("home"));
        assert!(StringMatch::exact("Home", true).matches("home"));
    }

    #[test]
    fn prefix_and_suffix() {
        assert!(StringMatch::prefix("usr", false).matches("usr-1"));
        assert!(StringMatch::prefix("USR", true).matches("usr-1"));
        assert!(!StringMatch::prefix("usr-10", true).matches("usr"));
        assert!(StringMatch::suffix(".png", false).matches("a.png"));
        assert!(StringMatch::suffix(".PNG", true).matches("a.png"));
        assert!(!StringMatch::suffix("long.png", true).matches(".png"));
    }

    #[test]
    fn contains_lowercases_needle_once() {
        let m = StringMatch::contains("ERR", true);
        assert!(m.matches("an error"));
        assert!(!StringMatch::contains("ERR", false).matches("an error"));
    }

    #[test]
    fn prefix_ignore_case_does_not_split_multibyte() {
        assert!(!StringMatch::prefix("a", true).matches("é"));
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = StringMatch::regex("([").unwrap_err();
        assert!(matches!(err, RouterError::InvalidPattern { .. }));
    }

    #[test]
    fn spec_compiles() {
        let m = StringMatchSpec::Regex(r"^\d+$".into()).compile().unwrap();
        assert!(m.matches("123"));
        let m = StringMatchSpec::Contains("mid".into()).compile().unwrap();
        assert!(m.matches("amidst"));
        assert!(StringMatchSpec::Regex("(".into()).compile().is_err());
    }

    #[test]
    fn display_names_the_strategy() {
        assert_eq!(StringMatch::exact("a", false).to_string(), "exact(\"a\")");
        assert_eq!(
            StringMatch::regex("^a$").unwrap().to_string(),
            "regex(\"^a$\")"
        );
    }
}
