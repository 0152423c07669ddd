//! ULID generator and related types.

use crate::{id::MAX_TIMESTAMP, Error, Ulid};
use alloc::string::String;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[cfg(feature = "std")]
pub mod sync;
pub mod with_rand08;

#[cfg(test)]
mod tests;

/// Number of random bytes consumed each time the random field is reset.
pub const RANDOM_BYTES: usize = 10;

const HALF_MASK: u64 = (1 << 40) - 1;

/// Set in a half only after its 40 bits carry out.
const INCREMENT_MAX: u64 = 1 << 40;

/// A trait that defines the minimum random number generator interface for [`UlidGenerator`].
///
/// The generator requests exactly [`RANDOM_BYTES`] bytes per reset. Implementations are expected
/// to be cryptographically strong and infallible in practice; a failing source should panic, which
/// aborts the generation request without touching the generator state.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`UlidGenerator`].
pub trait TimeSource {
    /// Returns the current Unix time in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// A [`TimeSource`] stuck at a given millisecond, for tests and for replaying a known timestamp.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct FixedTime(pub u64);

impl TimeSource for FixedTime {
    fn unix_ts_ms(&mut self) -> u64 {
        self.0
    }
}

/// Represents a ULID generator that keeps the previous timestamp and random field and guarantees
/// the monotonic order of ULIDs generated within the same millisecond.
///
/// When the timestamp differs from the previous call, the 80-bit random field is reset to fresh
/// random bytes. When it is the same, the random field is incremented by one instead, so that the
/// new ULID sorts right after the previous one. The field is kept as two 40-bit halves, and a
/// carry out of the lower half increments the upper half.
///
/// A timestamp smaller than the previous one is treated as a new millisecond: the random field is
/// reset, and the increasing order of ULIDs is broken across such a clock rollback.
///
/// # Generator functions
///
/// | Flavor                    | Timestamp    | On exhausted random field |
/// | ------------------------- | ------------ | ------------------------- |
/// | [`create`]                | Time source  | Reseeds                   |
/// | [`create_or_abort`]       | Time source  | Returns error             |
/// | [`create_core`]           | Argument     | Reseeds                   |
/// | [`create_or_abort_core`]  | Argument     | Returns error             |
///
/// The random field is exhausted once it reaches `2^80 - 1` within one millisecond. Reseeding
/// keeps the generator available but the ULID produced then may sort before the previous one.
///
/// This type takes `&mut self`; wrap it in a [`SyncGenerator`](sync::SyncGenerator) to share it
/// across threads.
///
/// # Examples
///
/// ```rust
/// use monoulid::{FixedTime, UlidGenerator};
/// use monoulid::generator::with_rand08::Adapter;
///
/// let mut g = UlidGenerator::with_rand_and_time_sources(Adapter(rand::rngs::OsRng), FixedTime(1));
/// let x = g.create();
/// let y = g.create();
/// assert_eq!(x.random() + 1, y.random());
/// assert!(x.to_string() < y.to_string());
/// ```
///
/// [`create`]: UlidGenerator::create
/// [`create_or_abort`]: UlidGenerator::create_or_abort
/// [`create_core`]: UlidGenerator::create_core
/// [`create_or_abort_core`]: UlidGenerator::create_or_abort_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct UlidGenerator<R, T> {
    /// `None` until the first ULID is generated.
    previous: Option<u64>,
    random1: u64,
    random2: u64,

    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R, T> UlidGenerator<R, T> {
    /// Creates a generator with a random number generator and a system clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            previous: None,
            random1: 0,
            random2: 0,
            rand_source,
            time_source,
        }
    }

    /// Replaces the random number generator, keeping the generator state.
    pub fn set_rand_source(&mut self, rand_source: R) {
        self.rand_source = rand_source;
    }

    /// Replaces the system clock, keeping the generator state.
    pub fn set_time_source(&mut self, time_source: T) {
        self.time_source = time_source;
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: RandSource> UlidGenerator<R, StdSystemTime> {
    /// Creates a generator with a random number generator and the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> UlidGenerator<R, T> {
    /// Generates a new ULID from the current timestamp, reseeding the random field if exhausted.
    pub fn create(&mut self) -> Ulid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.create_core(unix_ts_ms)
    }

    /// Generates a new ULID from the current timestamp, or returns
    /// [`Error::GeneratorExhausted`] if the random field cannot be incremented.
    pub fn create_or_abort(&mut self) -> Result<Ulid, Error> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.create_or_abort_core(unix_ts_ms)
    }

    /// Generates a new ULID whose version and variant bits are stamped so that its binary form
    /// passes validation as a UUIDv4.
    ///
    /// The generator state advances exactly as with [`create`](Self::create); only the returned
    /// value is altered, losing six bits of its random field.
    pub fn create_tagged(&mut self) -> Ulid {
        Ulid::from(self.create().to_uuid4())
    }

    /// Generates a new ULID and returns its canonical string representation.
    pub fn create_string(&mut self) -> String {
        self.create().into()
    }

    /// Generates a new version-tagged ULID and returns its canonical string representation.
    pub fn create_tagged_string(&mut self) -> String {
        self.create_tagged().into()
    }

    /// Generates a new ULID from the `unix_ts_ms` passed, reseeding the random field if
    /// exhausted.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create_core(&mut self, unix_ts_ms: u64) -> Ulid {
        match self.create_or_abort_core(unix_ts_ms) {
            Ok(value) => value,
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(unix_ts_ms, "random field exhausted; reseeding");
                self.reset();
                Ulid::from_halves(unix_ts_ms, self.random1, self.random2)
            }
        }
    }

    /// Generates a new ULID from the `unix_ts_ms` passed, or returns
    /// [`Error::GeneratorExhausted`] if the random field cannot be incremented.
    ///
    /// The generator state is left untouched when an error is returned, so every further call
    /// within the same millisecond fails as well.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create_or_abort_core(&mut self, unix_ts_ms: u64) -> Result<Ulid, Error> {
        assert!(
            unix_ts_ms <= MAX_TIMESTAMP,
            "`unix_ts_ms` must be a 48-bit integer"
        );

        if self.previous == Some(unix_ts_ms) {
            if self.random1 == HALF_MASK && self.random2 == HALF_MASK {
                return Err(Error::GeneratorExhausted);
            }
            self.increment();
        } else {
            #[cfg(feature = "tracing")]
            if self.previous.is_some_and(|prev| unix_ts_ms < prev) {
                tracing::debug!(unix_ts_ms, previous = self.previous, "clock moved backwards");
            }
            self.reset();
        }

        self.previous = Some(unix_ts_ms);
        Ok(Ulid::from_halves(unix_ts_ms, self.random1, self.random2))
    }

    /// Draws a fresh random field: the first five bytes form the upper half and the last five the
    /// lower half.
    fn reset(&mut self) {
        let mut bytes = [0u8; RANDOM_BYTES];
        self.rand_source.fill_bytes(&mut bytes);
        let (hi, lo) = bytes.split_at(RANDOM_BYTES / 2);
        self.random1 = hi.iter().fold(0, |acc, &e| (acc << 8) | u64::from(e));
        self.random2 = lo.iter().fold(0, |acc, &e| (acc << 8) | u64::from(e));
    }

    /// Increments the random field by one, carrying from the lower half into the upper half.
    ///
    /// The caller checks for exhaustion first.
    fn increment(&mut self) {
        self.random2 += 1;
        if self.random2 >= INCREMENT_MAX {
            self.random2 &= HALF_MASK;
            self.random1 += 1;
        }
        debug_assert!(self.random1 < INCREMENT_MAX);
    }
}

/// Supports operations as an infinite iterator that produces a new ULID for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use monoulid::UlidGenerator;
///
/// UlidGenerator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for UlidGenerator<R, T> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.create())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for UlidGenerator<R, T> {}
