//! Schema — a compiled path pattern.
//!
//! A pattern such as `/match/:id/comments/` compiles into an ordered list of
//! [`Component`]s plus a *fingerprint*, the canonical form `/match/$/comments`
//! used for equality and hashing. Parameter names do not take part in the
//! fingerprint, so `/match/:id` and `/match/:slug` are the same schema.

use crate::tokenizer::{tokenize, OPEN_WILDCARD_SENTINEL, WILDCARD};
use crate::RouterError;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Fingerprint form of a parameter segment. Reserved as a literal.
const PARAMETER_MARKER: &str = "$";

/// A named parameter segment (`:name`) and its position in the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    index: usize,
}

impl Parameter {
    /// The parameter name, without the leading `:`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based segment index of this parameter.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Must equal the path token exactly (case-sensitive).
    Literal(String),
    /// Captures the path token under the parameter's name.
    Parameter(Parameter),
    /// Accepts any token; captures nothing. Holds the segment index.
    Wildcard(usize),
}

impl Component {
    /// Returns `true` if this is a [`Component::Wildcard`].
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }
}

/// A compiled path pattern.
///
/// # INV: identity is the fingerprint
///
/// Two schemas are equal iff their fingerprints are equal. The fingerprint
/// and its hash are computed once in [`Schema::compile`] and never change.
///
/// # Wildcards
///
/// - `/a/*` ends in an *open* wildcard: it matches `a` followed by one or
///   more segments. [`ends_in_wildcard`](Self::ends_in_wildcard) is `true`.
/// - `/a/*/` ends in a *single-segment* wildcard: it matches exactly two
///   segments. Its fingerprint keeps the trailing `/` (`/a/*/`), so it never
///   collides with `/a/*`.
///
/// A router interns the first schema registered for a fingerprint, so later
/// entries of the same shape capture under that schema's parameter names.
///
/// # Example
///
/// ```
/// use waypost::Schema;
///
/// let a = Schema::compile("/match/:id/").unwrap();
/// let b = Schema::compile("/match/:slug").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.fingerprint(), "/match/$");
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    pattern: String,
    fingerprint: String,
    components: Vec<Component>,
    parameters: Vec<Parameter>,
    ends_in_wildcard: bool,
    hash: u64,
}

impl Schema {
    /// Compile a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::BadSchema`] if a parameter segment has no name
    /// (e.g. `/:/foo`), or if a literal segment is `$`, which would share a
    /// fingerprint with a parameter.
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let mut tokens = tokenize(pattern);

        let single_segment_wildcard = tokens.len() >= 2
            && tokens[tokens.len() - 1] == OPEN_WILDCARD_SENTINEL
            && tokens[tokens.len() - 2] == WILDCARD;
        if single_segment_wildcard {
            tokens.pop();
        }

        let mut fingerprint = String::new();
        let mut components = Vec::with_capacity(tokens.len());
        let mut parameters = Vec::new();

        for (index, token) in tokens.into_iter().enumerate() {
            if let Some(name) = token.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouterError::BadSchema(format!(
                        "parameter {index} has no name in \"{pattern}\""
                    )));
                }
                fingerprint.push('/');
                fingerprint.push_str(PARAMETER_MARKER);
                let parameter = Parameter {
                    name: name.to_owned(),
                    index,
                };
                parameters.push(parameter.clone());
                components.push(Component::Parameter(parameter));
            } else if token == WILDCARD {
                fingerprint.push_str("/*");
                components.push(Component::Wildcard(index));
            } else if token == PARAMETER_MARKER {
                return Err(RouterError::BadSchema(format!(
                    "literal segment {index} is the reserved \"$\" in \"{pattern}\""
                )));
            } else {
                fingerprint.push('/');
                fingerprint.push_str(&token);
                components.push(Component::Literal(token));
            }
        }

        let ends_in_wildcard =
            !single_segment_wildcard && components.last().is_some_and(Component::is_wildcard);
        if single_segment_wildcard {
            fingerprint.push('/');
        }

        let mut hasher = DefaultHasher::new();
        fingerprint.hash(&mut hasher);

        Ok(Self {
            pattern: pattern.to_owned(),
            hash: hasher.finish(),
            fingerprint,
            components,
            parameters,
            ends_in_wildcard,
        })
    }

    /// The pattern string this schema was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Canonical structural form: `$` for parameters, `*` for wildcards.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Ordered components.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Parameters in pattern order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Whether the schema ends in an open wildcard.
    #[must_use]
    pub fn ends_in_wildcard(&self) -> bool {
        self.ends_in_wildcard
    }

    /// Number of components. For an open-wildcard schema this is also the
    /// minimum number of path tokens it accepts (its wildcard floor).
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always `false`: every schema has at least the root component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for Schema {}

impl Hash for Schema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl FromStr for Schema {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
