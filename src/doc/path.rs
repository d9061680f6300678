//! Path queries: `Class.member`, `Class#member`, `Class.method.param`.
//!
//! Lookups are case-insensitive and never fail loudly; an unmatched segment
//! anywhere in the path yields `None`.

use super::{DocGraph, ElementId};

/// Split a query on `.` and `#`, lowercasing every segment.
pub(crate) fn tokenize(query: &str) -> Vec<String> {
    query
        .split(['.', '#'])
        .map(str::to_lowercase)
        .collect()
}

/// Word-like tokens are the only ones that may name another element.
fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

impl DocGraph {
    pub(crate) fn resolve(&self, query: &str) -> Option<ElementId> {
        let mut terms = tokenize(query).into_iter();
        let mut current = self.roots.get(&terms.next()?)?;
        let mut scope = current;

        while let Some(term) = terms.next() {
            current = self.raw_element(scope).children.get(&term)?;
            // A member whose type names one other element is walked through,
            // unless it is the last segment.
            scope = if !terms.as_slice().is_empty() {
                self.alias_target(current).unwrap_or(current)
            } else {
                current
            };
        }

        Some(current)
    }

    /// The single top-level element referenced by `id`'s type tokens, if there
    /// is exactly one (other than the element itself).
    pub(crate) fn alias_target(&self, id: ElementId) -> Option<ElementId> {
        let mut target = None;

        for token in &self.raw_element(id).type_tokens {
            if !is_identifier(token) {
                continue;
            }
            let Some(referenced) = self.roots.get(token) else {
                continue;
            };
            if referenced == id {
                continue;
            }
            match target {
                None => target = Some(referenced),
                Some(existing) if existing == referenced => {}
                Some(_) => return None,
            }
        }

        target
    }
}
