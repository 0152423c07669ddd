//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::Ulid;
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a ULID object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// ULIDs generated within the same millisecond. On Unix, this function resets the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let ulid = monoulid::ulid();
/// println!("{ulid}"); // e.g., "01ARYZ6S41TSV4RRFFQ69G5FAV"
/// println!("{}", ulid.timestamp()); // milliseconds since the Unix epoch
/// ```
pub fn ulid() -> Ulid {
    lock_global_gen().get_mut().create()
}

/// Generates the canonical string representation of a ULID.
///
/// # Examples
///
/// ```rust
/// let text: String = monoulid::ulid_string();
/// assert_eq!(text.len(), 26);
/// ```
pub fn ulid_string() -> String {
    lock_global_gen().get_mut().create_string()
}

/// Generates a ULID object whose binary form is stamped with UUIDv4 version and variant bits.
///
/// See [`UlidGenerator::create_tagged`](crate::UlidGenerator::create_tagged).
///
/// # Examples
///
/// ```rust
/// let ulid = monoulid::tagged_ulid();
/// println!("{}", ulid.to_uuid()); // e.g., "01563df3-6c99-4d06-b3d6-d6d1ad2bf6cb"
/// assert_eq!(ulid.to_uuid().version(), Some(4));
/// ```
pub fn tagged_ulid() -> Ulid {
    lock_global_gen().get_mut().create_tagged()
}

/// Generates the canonical string representation of a version-tagged ULID.
pub fn tagged_ulid_string() -> String {
    lock_global_gen().get_mut().create_tagged_string()
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::{RandSource, StdSystemTime, UlidGenerator};

    /// The random number generator of the global generator.
    ///
    /// It employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the strategy used by
    /// [`rand::rngs::ThreadRng`].
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl RandSource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest);
        }
    }

    impl Default for GlobalGenRng {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("monoulid: could not initialize global generator");
            Self(ReseedingRng::new(core, 1024 * 64, OsRng))
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: UlidGenerator<GlobalGenRng, StdSystemTime>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: UlidGenerator::new(GlobalGenRng::default()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`UlidGenerator`] instance, resetting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut UlidGenerator<GlobalGenRng, StdSystemTime> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
