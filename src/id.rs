use core::{fmt, str};

use crate::{base32, util, Error, Uuid};
use alloc::string::String;
use fstr::FStr;

/// Largest value of the 48-bit timestamp field.
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// Largest value of the 80-bit random field.
pub const MAX_RANDOM: u128 = (1 << 80) - 1;

pub(crate) const TIMESTAMP_DIGITS: usize = 10;
pub(crate) const RANDOM_DIGITS: usize = 16;
pub(crate) const ULID_DIGITS: usize = TIMESTAMP_DIGITS + RANDOM_DIGITS;

const HALF_BITS: u32 = 40;
const MAX_HALF: u64 = (1 << HALF_BITS) - 1;

/// Represents a Universally Unique Lexicographically Sortable Identifier.
///
/// The 128-bit value holds a 48-bit millisecond Unix timestamp in the most significant bits and an
/// 80-bit random field in the rest. The integer order, the byte order, and the order of the
/// canonical 26-digit Crockford Base32 strings all agree.
///
/// # Examples
///
/// ```rust
/// use monoulid::Ulid;
///
/// let x = "01ARYZ6S41TSV4RRFFQ69G5FAV".parse::<Ulid>()?;
/// assert_eq!(x.timestamp(), 1469918176385);
/// assert_eq!(&x.encode() as &str, "01ARYZ6S41TSV4RRFFQ69G5FAV");
///
/// // separators and lowercase letters are accepted on input
/// assert_eq!("01aryz6s41-tsv4-rrff-q69g-5fav".parse::<Ulid>()?, x);
/// # Ok::<(), monoulid::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Ulid(u128);

impl Ulid {
    /// Nil ULID (00000000000000000000000000)
    pub const NIL: Self = Self(0);

    /// Max ULID (7ZZZZZZZZZZZZZZZZZZZZZZZZZ)
    pub const MAX: Self = Self(u128::MAX);

    /// Creates an object from the timestamp and the 80-bit random field.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` exceeds 48 bits or `random` exceeds 80 bits.
    pub const fn from_parts(timestamp: u64, random: u128) -> Self {
        if timestamp > MAX_TIMESTAMP || random > MAX_RANDOM {
            panic!("invalid field value");
        }
        Self(((timestamp as u128) << 80) | random)
    }

    /// Creates an object from the timestamp and the two 40-bit halves of the random field.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` exceeds 48 bits or either half exceeds 40 bits.
    pub const fn from_halves(timestamp: u64, random_hi: u64, random_lo: u64) -> Self {
        if random_hi > MAX_HALF || random_lo > MAX_HALF {
            panic!("invalid field value");
        }
        Self::from_parts(
            timestamp,
            ((random_hi as u128) << HALF_BITS) | random_lo as u128,
        )
    }

    /// Returns the 48-bit millisecond Unix timestamp.
    pub const fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }

    /// Returns the 80-bit random field.
    pub const fn random(&self) -> u128 {
        self.0 & MAX_RANDOM
    }

    /// Returns the upper and lower 40-bit halves of the random field.
    pub const fn random_halves(&self) -> (u64, u64) {
        let random = self.random();
        ((random >> HALF_BITS) as u64, random as u64 & MAX_HALF)
    }

    /// Returns the 128-bit unsigned integer representation.
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    /// Returns the 26-digit canonical string representation stored in a stack-allocated string.
    ///
    /// The first 10 digits encode the timestamp and the last 16 the random field, each
    /// zero-padded to its width.
    pub fn encode(&self) -> FStr<ULID_DIGITS> {
        let mut buffer = [0u8; ULID_DIGITS];
        let (ts, random) = buffer.split_at_mut(TIMESTAMP_DIGITS);
        base32::encode_fixed(u128::from(self.timestamp()), ts);
        base32::encode_fixed(self.random(), random);
        debug_assert!(buffer.is_ascii());
        // SAFETY: every byte is a digit from the ASCII alphabet
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the binary value with the timestamp in the upper 48 bits and the random field in
    /// the lower 80 bits, without any bit reinterpretation.
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from(self.0)
    }

    /// Returns the binary value with the version field set to `4` and the variant field set to
    /// `10`, so that it passes validation as a random-based UUID.
    ///
    /// This conversion is lossy: six bits of the random field are overwritten.
    pub fn to_uuid4(&self) -> Uuid {
        self.to_uuid().stamp_v4()
    }

    /// Parses an already normalized string of exactly 26 valid digits.
    pub(crate) fn from_canonical(src: &str) -> Result<Self, Error> {
        debug_assert_eq!(src.len(), ULID_DIGITS);
        let (ts, random) = src.split_at(TIMESTAMP_DIGITS);
        Ok(Self::from_parts(
            decode_timestamp(ts)?,
            decode_random(random)?,
        ))
    }
}

/// Decodes the 10-digit timestamp field, rejecting values above 48 bits.
///
/// Ten digits carry 50 bits, so a well-formed field can still be out of range.
pub(crate) fn decode_timestamp(digits: &str) -> Result<u64, Error> {
    match base32::decode(digits)? {
        n if n <= MAX_TIMESTAMP as u128 => Ok(n as u64),
        _ => Err(Error::overflow("timestamp", MAX_TIMESTAMP as u128)),
    }
}

/// Decodes the 16-digit random field.
pub(crate) fn decode_random(digits: &str) -> Result<u128, Error> {
    match base32::decode(digits)? {
        n if n <= MAX_RANDOM => Ok(n),
        _ => Err(Error::overflow("randomness", MAX_RANDOM)),
    }
}

impl fmt::Display for Ulid {
    /// Writes the 26-digit canonical string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Ulid {
    type Err = Error;

    /// Creates an object from a 26-digit string, ignoring hyphens and letter case.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(&util::normalize(src)?)
    }
}

impl From<Ulid> for u128 {
    fn from(src: Ulid) -> Self {
        src.0
    }
}

impl From<u128> for Ulid {
    fn from(src: u128) -> Self {
        Self(src)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(src: Ulid) -> Self {
        src.0.to_be_bytes()
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(src: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(src))
    }
}

impl From<Ulid> for Uuid {
    fn from(src: Ulid) -> Self {
        src.to_uuid()
    }
}

impl From<Uuid> for Ulid {
    fn from(src: Uuid) -> Self {
        Self(u128::from(src))
    }
}

impl From<Ulid> for String {
    fn from(src: Ulid) -> Self {
        src.encode().as_str().into()
    }
}

impl TryFrom<String> for Ulid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Ulid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&<[u8; 16]>::from(*self))
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
