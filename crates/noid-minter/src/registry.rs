mod global;
mod provider;
mod selection;

pub use global::*;
pub use provider::*;
pub use selection::*;

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Document, Error, IdentifierSpace, Minter, Result,
    mutex::{Mutex, lock},
};

/// A minter shared between every caller asking for the same document.
///
/// Minting mutates the minter, so access is serialized through the mutex.
pub type SharedMinter = Arc<Mutex<Box<dyn Minter>>>;

/// Maps document identities to their one live [`Minter`].
///
/// Minters are created lazily on the first request for a document and kept
/// until [`Self::remove`] or [`Self::clear`]. The lookup and the construction
/// happen under a single map lock, so concurrent first requests for the same
/// document build exactly one minter.
///
/// Which implementation is built is decided by the registry's
/// [`MinterSelection`] against its table of [`MinterProvider`]s. The
/// built-in [`crate::DocumentMinter`] is always registered as
/// [`DEFAULT_MINTER_NAME`].
///
/// # Example
/// ```
/// use noid_minter::{IdentifierSpace, MinterRegistry, model::Manifest};
/// use std::sync::Arc;
///
/// let registry = MinterRegistry::new(Arc::new(IdentifierSpace::noid()?));
/// let manifest = Manifest::new("https://example.org/iiif/book1");
///
/// let minter = registry.get_minter(&manifest)?;
/// let again = registry.get_minter_for_id("https://example.org/iiif/book1")?;
/// assert!(Arc::ptr_eq(&minter, &again));
/// # Ok::<(), noid_minter::Error>(())
/// ```
pub struct MinterRegistry {
    space: Arc<IdentifierSpace>,
    providers: HashMap<String, MinterProvider>,
    selection: MinterSelection,
    minters: Mutex<HashMap<String, SharedMinter>>,
}

impl MinterRegistry {
    /// Creates a registry with the built-in provider, reading the process
    /// environment once.
    pub fn new(space: Arc<IdentifierSpace>) -> Self {
        Self::builder(space).build()
    }

    pub fn builder(space: Arc<IdentifierSpace>) -> RegistryBuilder {
        RegistryBuilder::new(space)
    }

    /// Returns the minter for `document`, creating it from the document's
    /// object graph on first request.
    ///
    /// # Errors
    /// - [`Error::MinterConstructionFailed`] if the selected implementation is
    ///   unknown, cannot be built from a document, or fails to build (for
    ///   example on a duplicate canvas identifier). Nothing is cached then.
    pub fn get_minter(&self, document: &dyn Document) -> Result<SharedMinter> {
        self.get_or_create(document.id(), |key, provider| {
            provider.construct_from_document(key, self.space.clone(), document)
        })
    }

    /// Returns the minter for `document_id`, creating an empty one on first
    /// request.
    ///
    /// # Errors
    /// See [`Self::get_minter`].
    pub fn get_minter_for_id(&self, document_id: &str) -> Result<SharedMinter> {
        self.get_or_create(document_id, |key, provider| {
            provider.construct_from_id(key, self.space.clone(), document_id)
        })
    }

    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, construct)))]
    fn get_or_create<F>(&self, document_id: &str, construct: F) -> Result<SharedMinter>
    where
        F: FnOnce(&str, &MinterProvider) -> Result<Box<dyn Minter>>,
    {
        let mut minters = lock(&self.minters)?;
        if let Some(minter) = minters.get(document_id) {
            return Ok(Arc::clone(minter));
        }

        let key = self.selection.resolve()?;
        let minter = self
            .providers
            .get(&key)
            .ok_or_else(|| Error::UnknownMinter { key: key.clone() })
            .and_then(|provider| construct(&key, provider))
            .map_err(|e| Self::cold_construction_failed(&key, e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(implementation = %key, "created minter");

        let minter = Arc::new(Mutex::new(minter));
        minters.insert(document_id.to_owned(), Arc::clone(&minter));
        Ok(minter)
    }

    #[cold]
    #[inline(never)]
    fn cold_construction_failed(key: &str, source: Error) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(implementation = key, error = %source, "minter construction failed");

        Error::construction(key, source)
    }

    /// Overrides the implementation used for minters created from now on,
    /// returning the previous override. Existing minters are unaffected.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn set_minter_implementation(&self, key: impl Into<String>) -> Result<Option<String>> {
        self.selection.set(key)
    }

    /// Drops the override so selection falls back to the environment, the
    /// properties, and then the default.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn clear_minter_implementation(&self) -> Result<Option<String>> {
        self.selection.clear()
    }

    /// The implementation key new minters would be built with.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn minter_implementation(&self) -> Result<String> {
        self.selection.resolve()
    }

    /// Forgets the minter for `document_id`. The next request builds a fresh
    /// one, which may hand out identifiers the old one already issued.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn remove(&self, document_id: &str) -> Result<Option<SharedMinter>> {
        Ok(lock(&self.minters)?.remove(document_id))
    }

    /// Forgets every minter.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn clear(&self) -> Result<()> {
        lock(&self.minters)?.clear();
        Ok(())
    }

    /// The number of live minters.
    ///
    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.minters)?.len())
    }

    /// # Errors
    /// - Returns an error if the lock is poisoned (std mutexes only).
    pub fn is_empty(&self) -> Result<bool> {
        Ok(lock(&self.minters)?.is_empty())
    }

    /// The space every minter in this registry draws from.
    #[must_use]
    pub fn space(&self) -> &Arc<IdentifierSpace> {
        &self.space
    }

    /// The selection rules this registry resolves implementations with.
    #[must_use]
    pub fn selection(&self) -> &MinterSelection {
        &self.selection
    }
}

impl fmt::Debug for MinterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinterRegistry")
            .field("space", &self.space)
            .field("providers", &self.providers)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

/// Configures a [`MinterRegistry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    space: Arc<IdentifierSpace>,
    providers: HashMap<String, MinterProvider>,
    env: Option<HashMap<String, String>>,
    properties: HashMap<String, String>,
}

impl RegistryBuilder {
    pub fn new(space: Arc<IdentifierSpace>) -> Self {
        let mut providers = HashMap::new();
        providers.insert(
            DEFAULT_MINTER_NAME.to_owned(),
            MinterProvider::document_minter(),
        );
        Self {
            space,
            providers,
            env: None,
            properties: HashMap::new(),
        }
    }

    /// Registers `provider` under `key`, replacing any provider already
    /// there (including the default one).
    #[must_use]
    pub fn provider(mut self, key: impl Into<String>, provider: MinterProvider) -> Self {
        self.providers.insert(key.into(), provider);
        self
    }

    /// Sets a process property such as [`MINTER_NAME_PROPERTY`].
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Uses `env` instead of the process environment.
    #[must_use]
    pub fn environment<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            env.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn build(self) -> MinterRegistry {
        let env = self.env.unwrap_or_else(MinterSelection::process_env);
        MinterRegistry {
            space: self.space,
            providers: self.providers,
            selection: MinterSelection::new(env, self.properties),
            minters: Mutex::new(HashMap::new()),
        }
    }
}
