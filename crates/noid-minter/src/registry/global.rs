use std::sync::{Arc, LazyLock};

use crate::{IdentifierSpace, MinterRegistry};

static GLOBAL_REGISTRY: LazyLock<MinterRegistry> = LazyLock::new(|| {
    let space = IdentifierSpace::noid().expect("NOID identifier space failed its integrity check");
    MinterRegistry::new(Arc::new(space))
});

/// Returns the process-wide registry over the NOID space, building the space
/// on first use.
///
/// Applications that want control over the space or the providers should
/// build their own [`MinterRegistry`] and pass it around instead.
///
/// # Panics
/// Panics on first use if the NOID space fails its integrity check.
pub fn global_registry() -> &'static MinterRegistry {
    &GLOBAL_REGISTRY
}
