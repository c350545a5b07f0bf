//! Schema matching — structural comparison of a schema against path tokens.

use crate::tokenizer::tokenize;
use crate::{Component, RouterError, Schema};
use std::collections::HashMap;

/// Captured parameters: parameter name → path token.
pub type RouteBundle = HashMap<String, String>;

impl Schema {
    /// Match this schema against already-tokenized path segments.
    ///
    /// # Rules
    ///
    /// - Token count must equal the component count, unless the schema ends
    ///   in an open wildcard, in which case it may be greater or equal.
    ///   Tokens past the wildcard are consumed by it, not captured.
    /// - A literal requires case-sensitive equality with its token.
    /// - A parameter captures its token. If a name repeats, the last wins.
    /// - A wildcard accepts any token.
    ///
    /// Returns `None` on a length or literal mismatch.
    ///
    /// # Example
    ///
    /// ```
    /// use waypost::Schema;
    ///
    /// let schema = Schema::compile("/match/:id/comments/").unwrap();
    /// let bundle = schema.match_tokens(&["match", "42", "comments"]).unwrap();
    /// assert_eq!(bundle["id"], "42");
    /// assert!(schema.match_tokens(&["game", "42", "comments"]).is_none());
    /// ```
    #[must_use]
    pub fn match_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Option<RouteBundle> {
        let components = self.components();
        let length_ok = if self.ends_in_wildcard() {
            tokens.len() >= components.len()
        } else {
            tokens.len() == components.len()
        };
        if !length_ok {
            return None;
        }

        let mut bundle = RouteBundle::new();
        for (component, token) in components.iter().zip(tokens) {
            let token = token.as_ref();
            match component {
                Component::Literal(literal) => {
                    if literal != token {
                        return None;
                    }
                }
                Component::Parameter(parameter) => {
                    bundle.insert(parameter.name().to_owned(), token.to_owned());
                }
                Component::Wildcard(_) => {}
            }
        }

        Some(bundle)
    }

    /// Tokenize `path` and match it against this schema.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteBundle> {
        self.match_tokens(&tokenize(path))
    }

    /// Read this schema's parameters out of a concrete path.
    ///
    /// Unlike [`match_path`](Self::match_path), literals are not compared:
    /// each parameter is read at its segment index.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::SchemaMismatch`] if the path's segment count
    /// differs from the schema's component count.
    pub fn parse_parameters(&self, path: &str) -> Result<RouteBundle, RouterError> {
        let tokens = tokenize(path);
        if tokens.len() != self.len() {
            return Err(RouterError::SchemaMismatch(format!(
                "segment counts for \"{path}\" ({}) and \"{}\" ({}) do not match",
                tokens.len(),
                self.fingerprint(),
                self.len()
            )));
        }

        Ok(self
            .parameters()
            .iter()
            .filter_map(|parameter| {
                tokens
                    .get(parameter.index())
                    .map(|token| (parameter.name().to_owned(), token.clone()))
            })
            .collect())
    }
}
