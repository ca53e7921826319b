use std::collections::HashMap;

use crate::{
    Result,
    mutex::{Mutex, lock},
};

/// Environment variable naming the minter implementation.
pub const ENV_MINTER_NAME: &str = "NOID_MINTER";

/// Process property naming the minter implementation.
pub const MINTER_NAME_PROPERTY: &str = "noid.minter";

/// Key of the built-in [`crate::DocumentMinter`] provider.
pub const DEFAULT_MINTER_NAME: &str = "default";

/// Decides which minter implementation new minters are built with.
///
/// The key is resolved, in order, from an explicit override, the
/// [`ENV_MINTER_NAME`] environment variable, the [`MINTER_NAME_PROPERTY`]
/// process property, and finally [`DEFAULT_MINTER_NAME`].
///
/// The environment is captured once when the selection is built, so later
/// changes to the process environment are not seen.
#[derive(Debug, Default)]
pub struct MinterSelection {
    overridden: Mutex<Option<String>>,
    env: HashMap<String, String>,
    properties: HashMap<String, String>,
}

impl MinterSelection {
    pub fn new(env: HashMap<String, String>, properties: HashMap<String, String>) -> Self {
        Self {
            overridden: Mutex::new(None),
            env,
            properties,
        }
    }

    /// Captures the current process environment. Variables that are not
    /// valid Unicode are skipped.
    #[must_use]
    pub fn process_env() -> HashMap<String, String> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Overrides the implementation key, returning the previous override.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn set(&self, key: impl Into<String>) -> Result<Option<String>> {
        Ok(lock(&self.overridden)?.replace(key.into()))
    }

    /// Removes the override, returning it.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn clear(&self) -> Result<Option<String>> {
        Ok(lock(&self.overridden)?.take())
    }

    /// Returns the key new minters should be built with.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn resolve(&self) -> Result<String> {
        if let Some(key) = lock(&self.overridden)?.as_ref() {
            return Ok(key.clone());
        }

        let key = self
            .env
            .get(ENV_MINTER_NAME)
            .or_else(|| self.properties.get(MINTER_NAME_PROPERTY))
            .map_or(DEFAULT_MINTER_NAME, String::as_str);

        Ok(key.to_owned())
    }

    /// Returns a process property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn falls_back_to_default() {
        let selection = MinterSelection::default();
        assert_eq!(selection.resolve().unwrap(), DEFAULT_MINTER_NAME);
    }

    #[test]
    fn resolves_in_priority_order() {
        let selection = MinterSelection::new(
            map(&[(ENV_MINTER_NAME, "from-env")]),
            map(&[(MINTER_NAME_PROPERTY, "from-property")]),
        );
        assert_eq!(selection.resolve().unwrap(), "from-env");

        assert_eq!(selection.set("explicit").unwrap(), None);
        assert_eq!(selection.resolve().unwrap(), "explicit");

        assert_eq!(selection.clear().unwrap().as_deref(), Some("explicit"));
        assert_eq!(selection.resolve().unwrap(), "from-env");
    }

    #[test]
    fn property_applies_without_env() {
        let selection =
            MinterSelection::new(HashMap::new(), map(&[(MINTER_NAME_PROPERTY, "from-property")]));
        assert_eq!(selection.resolve().unwrap(), "from-property");
        assert_eq!(selection.property(MINTER_NAME_PROPERTY), Some("from-property"));
    }

    #[test]
    fn set_returns_previous_override() {
        let selection = MinterSelection::default();
        selection.set("a").unwrap();
        assert_eq!(selection.set("b").unwrap().as_deref(), Some("a"));
        assert_eq!(selection.clear().unwrap().as_deref(), Some("b"));
        assert_eq!(selection.clear().unwrap(), None);
    }
}
