//! Deterministic cache keys
//!
//! A key is `{prefix}:{positional args joined by ":"}:{sorted k=v pairs joined by ":"}`,
//! with empty segments omitted. Positional order is significant, keyword order
//! is not. Argument text is not escaped: a value containing `:` can collide
//! with a different argument tuple, and existing key layouts rely on the
//! unescaped form.

use crate::constants::KEY_SEPARATOR;
use std::collections::BTreeMap;
use std::fmt;

/// Call arguments that identify one cached computation
///
/// # Example
///
/// ```
/// use aside_domain::CacheArgs;
///
/// let args = CacheArgs::new().arg(7).kwarg("page", 2);
/// assert_eq!(args.positional(), ["7"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheArgs {
    positional: Vec<String>,
    keyword: BTreeMap<String, String>,
}

impl CacheArgs {
    /// No arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    #[must_use]
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Add (or replace) a keyword argument
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.keyword.insert(name.into(), value.to_string());
        self
    }

    /// True when neither positional nor keyword arguments are present
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Positional arguments in call order
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Keyword arguments sorted by name
    pub fn keyword(&self) -> &BTreeMap<String, String> {
        &self.keyword
    }
}

/// A fully composed cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Compose the key for `prefix` and `args`
    pub fn new(prefix: &str, args: &CacheArgs) -> Self {
        let mut parts = vec![prefix.to_string()];

        if !args.positional.is_empty() {
            parts.push(args.positional.join(KEY_SEPARATOR));
        }

        if !args.keyword.is_empty() {
            let pairs: Vec<String> = args
                .keyword
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            parts.push(pairs.join(KEY_SEPARATOR));
        }

        Self(parts.join(KEY_SEPARATOR))
    }

    /// Glob pattern matching every key stored under `prefix`
    pub fn sweep_pattern(prefix: &str) -> String {
        format!("{prefix}{KEY_SEPARATOR}*")
    }

    /// Borrow the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
