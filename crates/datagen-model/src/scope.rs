//! Declaring scopes for catalogued types
//!
//! Provides [`ScopePath`], the dotted namespace a type is declared in.
//! Implementation lookup only considers subtypes declared within the
//! supertype's scope.

use std::fmt::{self, Display, Formatter};

/// Dotted namespace a type is declared in
///
/// # Examples
/// - `["com", "acme", "model"]` → `com.acme.model`
/// - `[]` → the root scope, which contains every other scope
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopePath(Vec<String>);

impl ScopePath {
    /// Create new scope from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Root scope
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Check if this is the root scope
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if `other` is declared in this scope or one nested below it
    ///
    /// # Examples
    /// - `com.acme` contains `com.acme.model`
    /// - `com.acme` contains `com.acme`
    /// - `com.acme` does NOT contain `com.other`
    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }
}

impl Display for ScopePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(text: &str) -> ScopePath {
        ScopePath::new(text.split('.').map(str::to_string).collect())
    }

    #[test]
    fn scope_root() {
        let root = ScopePath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert!(!scope("com").is_root());
    }

    #[test]
    fn scope_contains_nested() {
        let outer = scope("com.acme");
        let inner = scope("com.acme.model");
        let other = scope("com.other");

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&other));
        assert!(ScopePath::root().contains(&other));
    }

    #[test]
    fn scope_display() {
        assert_eq!(scope("a.b_c.d1").to_string(), "a.b_c.d1");
    }
}
