//! Path tokenizer — splits a raw path into segment tokens.
//!
//! The same function tokenizes registered patterns and incoming paths. Any
//! asymmetry between the two would make structurally identical strings fail
//! to match, so there is exactly one tokenizer.

/// A segment consisting of exactly this string is a wildcard.
pub const WILDCARD: &str = "*";

/// Token appended after a final `*` when the raw path ends with `/`.
///
/// It separates `/a/*/` (the wildcard stands for one segment) from `/a/*`
/// (the wildcard stands for everything that follows).
pub const OPEN_WILDCARD_SENTINEL: &str = "";

/// Split `path` into its non-empty `/`-separated segments.
///
/// # Rules
///
/// - Leading, duplicate and trailing slashes produce no tokens.
/// - If the last segment is exactly `*` and `path` ends with `/`,
///   [`OPEN_WILDCARD_SENTINEL`] is appended.
/// - A path with no segments (`""`, `"/"`, `"//"`) yields `[""]`, the root.
///
/// # Example
///
/// ```
/// use waypost::tokenize;
///
/// assert_eq!(tokenize("/match/42/comments/"), vec!["match", "42", "comments"]);
/// assert_eq!(tokenize("/"), vec![""]);
/// assert_eq!(tokenize("/files/*/"), vec!["files", "*", ""]);
/// ```
#[must_use]
pub fn tokenize(path: &str) -> Vec<String> {
    let mut tokens: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect();

    if tokens.last().is_some_and(|last| last == WILDCARD) && path.ends_with('/') {
        tokens.push(OPEN_WILDCARD_SENTINEL.to_owned());
    }

    if tokens.is_empty() {
        tokens.push(String::new());
    }

    tokens
}
