//! Crockford Base32 codec and the string utilities built around it.
//!
//! The functions here operate on plain integers and strings rather than on [`Ulid`] so the same
//! arithmetic serves both full 26-digit identifiers and individual fields such as the 10-digit
//! timestamp.
//!
//! [`Ulid`]: crate::Ulid

use crate::Error;
use alloc::string::String;

/// The Crockford Base32 alphabet in digit order.
pub const ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// The digit representing zero, used to pad encoded fields.
pub const ZERO: char = '0';

/// The separator character accepted in human-entered input and stripped before decoding.
pub const SEPARATOR: char = '-';

const DIGITS: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 0xff;

/// Maps every accepted ASCII character to its 5-bit value, or to `NO_VALUE`.
const DECODE_MAP: [u8; 256] = {
    let mut map = [NO_VALUE; 256];
    let mut i = 0;
    while i < 32 {
        let c = DIGITS[i];
        map[c as usize] = i as u8;
        map[c.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    map[b'O' as usize] = 0;
    map[b'o' as usize] = 0;
    map[b'I' as usize] = 1;
    map[b'i' as usize] = 1;
    map[b'L' as usize] = 1;
    map[b'l' as usize] = 1;
    map
};

/// Returns the 5-bit value of a character, accepting lowercase letters and the `O`, `I`, and `L`
/// aliases.
const fn digit_of(ch: char) -> Option<u8> {
    if !ch.is_ascii() {
        return None;
    }
    match DECODE_MAP[ch as usize] {
        NO_VALUE => None,
        d => Some(d),
    }
}

/// Writes `value` into `dst` as right-aligned Crockford Base32 digits, padding with zeros.
///
/// The caller guarantees that `dst` is wide enough to hold all significant digits.
pub(crate) fn encode_fixed(mut value: u128, dst: &mut [u8]) {
    for e in dst.iter_mut().rev() {
        *e = DIGITS[(value & 31) as usize];
        value >>= 5;
    }
    debug_assert_eq!(value, 0, "value does not fit in {} digits", dst.len());
}

/// Encodes an unsigned integer with the minimum number of digits.
///
/// Zero is encoded as a single `'0'`. Use [`zero_fill`] to widen the result to a fixed width.
///
/// # Examples
///
/// ```rust
/// use monoulid::base32;
///
/// assert_eq!(base32::encode(281474976710655), "7ZZZZZZZZZ");
/// assert_eq!(base32::encode(0), "0");
/// ```
pub fn encode(value: u128) -> String {
    let bits = (u128::BITS - value.leading_zeros()) as usize;
    let width = bits.div_ceil(5).max(1);
    let mut buffer = [0u8; 26];
    let start = buffer.len() - width;
    encode_fixed(value, &mut buffer[start..]);
    buffer[start..].iter().map(|&b| char::from(b)).collect()
}

/// Decodes a sequence of Crockford Base32 digits into an unsigned integer.
///
/// Lowercase letters are accepted, as are the aliases `O`/`o` for `0` and `I`/`i`/`L`/`l` for `1`.
/// No width limit is imposed beyond the 128 bits of the return type; callers decoding a narrower
/// field check its range themselves.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if a character is outside the alphabet or if the value does not
/// fit in 128 bits.
pub fn decode(src: &str) -> Result<u128, Error> {
    let mut acc = 0u128;
    for (index, ch) in src.chars().enumerate() {
        let digit = digit_of(ch).ok_or(Error::invalid_char(ch, index))?;
        acc = acc
            .checked_mul(32)
            .ok_or(Error::overflow("value", u128::MAX))?
            | u128::from(digit);
    }
    Ok(acc)
}

/// Returns `true` if every character of `src` is an accepted Crockford Base32 digit (case
/// insensitive, aliases included).
pub fn is_valid(src: &str) -> bool {
    src.chars().all(|ch| digit_of(ch).is_some())
}

/// Prepends `fill` to `src` until it is `width` characters long.
///
/// A string already at or above `width` is returned unchanged; it is never truncated.
pub fn left_pad(src: &str, width: usize, fill: char) -> String {
    let len = src.chars().count();
    let mut dst = String::with_capacity(width.max(len));
    dst.extend(core::iter::repeat(fill).take(width.saturating_sub(len)));
    dst.push_str(src);
    dst
}

/// Left-pads `src` with the zero digit up to `width` characters.
pub fn zero_fill(src: &str, width: usize) -> String {
    left_pad(src, width, ZERO)
}

/// Replaces each character of `src` found at position `i` of `from` with the character at position
/// `i` of `to`.
///
/// This maps an equivalent alphabet (e.g., the base32hex digits) onto the Crockford one before
/// decoding.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if a character does not occur in `from` or has no counterpart
/// in `to`.
///
/// # Examples
///
/// ```rust
/// use monoulid::base32::{self, ALPHABET};
///
/// let hex = "0123456789abcdefghijklmnopqrstuv";
/// assert_eq!(base32::transliterate("vu10", hex, ALPHABET)?, "ZY10");
/// # Ok::<(), monoulid::Error>(())
/// ```
pub fn transliterate(src: &str, from: &str, to: &str) -> Result<String, Error> {
    src.chars()
        .enumerate()
        .map(|(index, ch)| {
            from.chars()
                .position(|e| e == ch)
                .and_then(|pos| to.chars().nth(pos))
                .ok_or(Error::invalid_char(ch, index))
        })
        .collect()
}

/// Strips every [`SEPARATOR`] from `src`, keeping the order of the remaining characters.
pub fn remove_separators(src: &str) -> String {
    src.chars().filter(|&ch| ch != SEPARATOR).collect()
}

/// Converts ASCII lowercase letters to uppercase, leaving every other character as is.
pub fn to_upper_case(src: &str) -> String {
    src.to_ascii_uppercase()
}
