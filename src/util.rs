//! String-level operations on ULIDs that have not been parsed into [`Ulid`] objects.
//!
//! Every function accepts human-entered input: hyphens are ignored and letters may be in either
//! case. The input is normalized with [`normalize`] before anything is extracted.
//!
//! [`Ulid`]: crate::Ulid

use crate::id::{self, RANDOM_DIGITS, TIMESTAMP_DIGITS, ULID_DIGITS};
use crate::{base32, Error, Ulid, Uuid};
use alloc::string::String;

/// Strips hyphens, converts to uppercase, and checks that exactly 26 Crockford Base32 digits
/// remain.
///
/// Aliases such as `O` or `l` are kept as they are; they decode to the same values as their
/// canonical digits.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the length or any character is invalid.
///
/// # Examples
///
/// ```rust
/// use monoulid::util;
///
/// assert_eq!(util::normalize("01aryz6s41-tsv4rrffq69g5fav")?, "01ARYZ6S41TSV4RRFFQ69G5FAV");
/// # Ok::<(), monoulid::Error>(())
/// ```
pub fn normalize(ulid: &str) -> Result<String, Error> {
    let normalized = base32::to_upper_case(&base32::remove_separators(ulid));
    let len = normalized.chars().count();
    if len != ULID_DIGITS {
        return Err(Error::invalid_length(len, ULID_DIGITS));
    }
    if let Some((index, ch)) = normalized
        .chars()
        .enumerate()
        .find(|&(_, ch)| !base32::is_valid(ch.encode_utf8(&mut [0; 4])))
    {
        return Err(Error::invalid_char(ch, index));
    }
    Ok(normalized)
}

/// Returns the first 10 digits, which encode the timestamp.
pub fn timestamp_component(ulid: &str) -> Result<String, Error> {
    let mut normalized = normalize(ulid)?;
    normalized.truncate(TIMESTAMP_DIGITS);
    Ok(normalized)
}

/// Returns the last 16 digits, which encode the random field.
pub fn randomness_component(ulid: &str) -> Result<String, Error> {
    let normalized = normalize(ulid)?;
    Ok(normalized[ULID_DIGITS - RANDOM_DIGITS..].into())
}

/// Extracts the millisecond Unix timestamp.
///
/// # Errors
///
/// Besides malformed input, returns [`Error::InvalidFormat`] if the timestamp digits decode to a
/// value above `2^48 - 1`. Ten digits can hold 50 bits, so a string like `8ZZZZZZZZZ...` is
/// well-formed but out of range.
///
/// # Examples
///
/// ```rust
/// use monoulid::util;
///
/// assert_eq!(util::extract_timestamp("7ZZZZZZZZZABCDEFGHJKMNPQRS")?, 281474976710655);
/// assert!(util::extract_timestamp("8ZZZZZZZZZABCDEFGHJKMNPQRS").is_err());
/// # Ok::<(), monoulid::Error>(())
/// ```
pub fn extract_timestamp(ulid: &str) -> Result<u64, Error> {
    id::decode_timestamp(&timestamp_component(ulid)?)
}

/// Extracts the timestamp as a [`SystemTime`](std::time::SystemTime).
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn extract_instant(ulid: &str) -> Result<std::time::SystemTime, Error> {
    use std::time::{Duration, UNIX_EPOCH};
    Ok(UNIX_EPOCH + Duration::from_millis(extract_timestamp(ulid)?))
}

/// Extracts the 80-bit random field.
pub fn extract_random(ulid: &str) -> Result<u128, Error> {
    id::decode_random(&randomness_component(ulid)?)
}

/// Decodes a ULID string into its plain 128-bit binary value.
pub fn to_uuid(ulid: &str) -> Result<Uuid, Error> {
    ulid.parse::<Ulid>().map(|e| e.to_uuid())
}

/// Decodes a ULID string into a binary value with version `4` and variant `10` bits stamped over
/// it. See [`Ulid::to_uuid4`].
pub fn to_uuid4(ulid: &str) -> Result<Uuid, Error> {
    ulid.parse::<Ulid>().map(|e| e.to_uuid4())
}
