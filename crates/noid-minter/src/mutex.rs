#[cfg(not(feature = "parking-lot"))]
pub use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "parking-lot")]
pub use parking_lot::{Mutex, MutexGuard};

use crate::Result;

/// Locks `mutex`, surfacing poisoning as [`crate::Error::LockPoisoned`] when
/// built with std mutexes.
///
/// # Errors
/// - Returns an error if the lock is poisoned (std mutexes only).
#[cfg_attr(feature = "parking-lot", allow(clippy::unnecessary_wraps))]
pub fn lock<T: ?Sized>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    #[cfg(feature = "parking-lot")]
    let guard = mutex.lock();
    #[cfg(not(feature = "parking-lot"))]
    let guard = mutex.lock()?;

    Ok(guard)
}
