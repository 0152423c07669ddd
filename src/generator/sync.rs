//! Thread-safe generator that serializes every operation through a single lock.

use super::{RandSource, TimeSource, UlidGenerator};
use crate::{Error, Ulid};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Wraps a [`UlidGenerator`] in a mutex so that it can be shared by reference across threads.
///
/// Every generation call and every source swap takes the same lock, so concurrent callers observe
/// a single total order of calls, and the monotonic guarantee of [`UlidGenerator`] holds across
/// that order rather than per thread.
///
/// # Examples
///
/// ```rust
/// use monoulid::{SyncGenerator, UlidGenerator};
/// use std::thread;
///
/// let g = SyncGenerator::new(UlidGenerator::with_rand08(rand::rngs::OsRng));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.create(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug, Default)]
pub struct SyncGenerator<R, T> {
    inner: Mutex<UlidGenerator<R, T>>,
}

impl<R, T> SyncGenerator<R, T> {
    /// Creates a thread-safe generator from a generator instance.
    pub const fn new(generator: UlidGenerator<R, T>) -> Self {
        Self {
            inner: Mutex::new(generator),
        }
    }

    /// Consumes this wrapper and returns the inner generator.
    pub fn into_inner(self) -> UlidGenerator<R, T> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the random number generator under the lock, keeping the generator state.
    pub fn set_rand_source(&self, rand_source: R) {
        self.lock().set_rand_source(rand_source);
    }

    /// Replaces the system clock under the lock, keeping the generator state.
    pub fn set_time_source(&self, time_source: T) {
        self.lock().set_time_source(time_source);
    }

    /// Locks the inner generator.
    ///
    /// A panicking source leaves the counters either fully updated or untouched, so the state
    /// behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, UlidGenerator<R, T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: RandSource, T: TimeSource> SyncGenerator<R, T> {
    /// Generates a new ULID. See [`UlidGenerator::create`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create(&self) -> Ulid {
        self.lock().create()
    }

    /// Generates a new ULID or returns an error if the random field is exhausted. See
    /// [`UlidGenerator::create_or_abort`].
    pub fn create_or_abort(&self) -> Result<Ulid, Error> {
        self.lock().create_or_abort()
    }

    /// Generates a new version-tagged ULID. See [`UlidGenerator::create_tagged`].
    pub fn create_tagged(&self) -> Ulid {
        self.lock().create_tagged()
    }

    /// Generates a new ULID string. See [`UlidGenerator::create_string`].
    pub fn create_string(&self) -> String {
        self.lock().create_string()
    }

    /// Generates a new version-tagged ULID string. See
    /// [`UlidGenerator::create_tagged_string`].
    pub fn create_tagged_string(&self) -> String {
        self.lock().create_tagged_string()
    }
}

impl<R, T> From<UlidGenerator<R, T>> for SyncGenerator<R, T> {
    fn from(src: UlidGenerator<R, T>) -> Self {
        Self::new(src)
    }
}
