//! Monotonic ULID generator with Crockford Base32 utilities and UUID-compatible projections
//!
//! ```rust
//! let ulid = monoulid::ulid();
//! println!("{}", ulid); // e.g., "01ARYZ6S41TSV4RRFFQ69G5FAV"
//! println!("{}", ulid.to_uuid()); // e.g., "01563df3-6c99-f306-b3d6-d6d1ad2bf6cb"
//!
//! let tagged = monoulid::tagged_ulid();
//! println!("{}", tagged.to_uuid()); // e.g., "01563df3-6c99-4d06-b3d6-d6d1ad2bf6cb"
//! ```
//!
//! Identifiers follow the [ULID](https://github.com/ulid/spec) format.
//!
//! # Field and bit layout
//!
//! This library produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |           random_hi           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   random_hi   |                   random_lo                   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           random_lo                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The 40-bit `random_hi` and `random_lo` fields together form the 80-bit random field. It is
//!   filled with random bytes whenever `unix_ts_ms` changes and is incremented by one for each new
//!   ULID generated within the same timestamp, carrying from `random_lo` into `random_hi`.
//!
//! The canonical text form is 26 Crockford Base32 digits: 10 for `unix_ts_ms` followed by 16 for
//! the random field. Since the digits are sorted in the same order as their values, the textual
//! order of ULIDs agrees with their numeric order.
//!
//! In the astronomically rare case where the random field reaches `2^80 - 1` within one
//! millisecond, the default functions reseed the random field and the monotonic order is broken
//! for that one ULID. [`UlidGenerator::create_or_abort`] returns [`Error::GeneratorExhausted`]
//! instead. A system clock rollback likewise resets the random field.
//!
//! # UUID projections
//!
//! A ULID converts to and from a 128-bit [`Uuid`] value losslessly. [`Ulid::to_uuid4`] and the
//! `tagged_*` functions instead overwrite six bits with version `4` and variant `10`, producing
//! values that pass UUIDv4 validation while keeping the timestamp prefix.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` enables the system clock source, [`SyncGenerator`], and [`std::error::Error`] impls.
//! - `global_gen` (implies `std`) enables the process-wide generator behind [`ulid()`] and its
//!   variants.
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of [`Ulid`].
//! - `uuid` enables conversion between [`Uuid`] and `uuid::Uuid`.
//! - `tracing` emits trace spans and debug events from the generators.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod base32;
pub mod generator;
pub mod util;

mod error;
pub use error::{Error, FormatError};

mod id;
pub use id::{Ulid, MAX_RANDOM, MAX_TIMESTAMP};

mod uuid;
pub use self::uuid::{Uuid, Variant};

#[doc(inline)]
pub use generator::{FixedTime, RandSource, TimeSource, UlidGenerator};

#[cfg(feature = "std")]
#[doc(inline)]
pub use generator::{sync::SyncGenerator, StdSystemTime};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{tagged_ulid, tagged_ulid_string, ulid, ulid_string};
