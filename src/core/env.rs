//! core::env
//!
//! Environment variable lookup behind a trait.
//!
//! CI detection and config discovery read the environment through [`Env`]
//! so that tests can supply a fixed map instead of mutating the process
//! environment.

use std::collections::HashMap;

/// A source of environment variables.
pub trait Env {
    /// Value of `key`, if set. An empty value counts as set.
    fn var(&self, key: &str) -> Option<String>;

    /// Check if `key` is set at all.
    fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some()
    }

    /// Value of `key` if set and non-empty.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }
}

impl Env for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Env + ?Sized> Env for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_env() {
        let env: HashMap<String, String> = [("CI", ""), ("NAME", "value")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert!(env.is_set("CI"));
        assert_eq!(env.non_empty("CI"), None);
        assert_eq!(env.non_empty("NAME").as_deref(), Some("value"));
        assert!(!env.is_set("MISSING"));
    }
}
