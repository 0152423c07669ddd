use core::fmt;

/// All errors this crate can return.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a valid Crockford Base32 or ULID representation.
    InvalidFormat(FormatError),

    /// The 80-bit random field can no longer be incremented within the current millisecond.
    ///
    /// Only the `or_abort` flavors of the generator methods return this; the other flavors reseed
    /// the random field instead.
    GeneratorExhausted,
}

/// Details of an [`Error::InvalidFormat`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum FormatError {
    /// A character outside the accepted alphabet was found at `index`.
    InvalidChar { ch: char, index: usize },

    /// The input has `len` characters where `expected` were required.
    InvalidLength { len: usize, expected: usize },

    /// The decoded `field` does not fit in its bit width; `max` is the largest accepted value.
    Overflow { field: &'static str, max: u128 },
}

impl Error {
    pub(crate) const fn invalid_char(ch: char, index: usize) -> Self {
        Self::InvalidFormat(FormatError::InvalidChar { ch, index })
    }

    pub(crate) const fn invalid_length(len: usize, expected: usize) -> Self {
        Self::InvalidFormat(FormatError::InvalidLength { len, expected })
    }

    pub(crate) const fn overflow(field: &'static str, max: u128) -> Self {
        Self::InvalidFormat(FormatError::Overflow { field, max })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(err) => write!(f, "invalid format: {err}"),
            Self::GeneratorExhausted => {
                write!(f, "random field exhausted within the current millisecond")
            }
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { ch, index } => {
                write!(f, "invalid character {ch:?} at index {index}")
            }
            Self::InvalidLength { len, expected } => {
                write!(f, "invalid length {len} (expected {expected})")
            }
            Self::Overflow { field, max } => write!(f, "{field} exceeds {max}"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for FormatError {}
