use core::fmt;

/// A 128-bit binary value laid out as a big-endian 16-byte array, the binary projection of a
/// [`Ulid`](crate::Ulid).
///
/// This type exists for interoperability with systems that store or validate UUIDs. It carries no
/// generation logic of its own.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

/// The variant field of a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility.
    Var0,
    /// `10xx`: the variant of RFC 4122 / RFC 9562 UUIDs.
    Var10,
    /// `110x`: reserved for Microsoft backward compatibility.
    Var110,
    /// `111x`: reserved for future definition.
    VarReserved,
}

impl Uuid {
    /// All bits cleared.
    pub const NIL: Self = Self([0x00; 16]);

    /// All bits set.
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the 4-bit version field, or `None` if the variant is not [`Variant::Var10`].
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the variant field.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Overwrites the version field with `4` and the variant field with `10`, discarding the six
    /// bits previously stored there.
    pub(crate) const fn stamp_v4(self) -> Self {
        let mut bytes = self.0;
        bytes[6] = 0x40 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Self(bytes)
    }
}

impl fmt::Display for Uuid {
    /// Writes the 8-4-4-4-12 hexadecimal representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                f.write_str("-")?;
            }
            write!(f, "{e:02x}")?;
        }
        Ok(())
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for ::uuid::Uuid {
        fn from(src: Uuid) -> Self {
            ::uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<::uuid::Uuid> for Uuid {
        fn from(src: ::uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};
    use alloc::string::ToString;

    /// Formats as lowercase 8-4-4-4-12 hexadecimal
    #[test]
    fn formats_as_lowercase_8_4_4_4_12_hexadecimal() {
        assert_eq!(Uuid::NIL.to_string(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(Uuid::MAX.to_string(), "ffffffff-ffff-ffff-ffff-ffffffffffff");
        assert_eq!(
            Uuid::from(0x0123_4567_89ab_cdef_0123_4567_89ab_cdefu128).to_string(),
            "01234567-89ab-cdef-0123-456789abcdef"
        );
    }

    /// Stamps version 4 and variant 10 over existing bits
    #[test]
    fn stamps_version_4_and_variant_10_over_existing_bits() {
        for src in [Uuid::NIL, Uuid::MAX, Uuid::from(0x0123_4567_89ab_cdef_0123_4567_89ab_cdefu128)] {
            let e = src.stamp_v4();
            assert_eq!(e.version(), Some(4));
            assert_eq!(e.variant(), Variant::Var10);

            let mask: u128 = !((0xf << 76) | (0x3 << 62));
            assert_eq!(u128::from(e) & mask, u128::from(src) & mask);
        }
        assert_eq!(Uuid::MAX.stamp_v4().to_string(), "ffffffff-ffff-4fff-bfff-ffffffffffff");
        assert_eq!(Uuid::NIL.stamp_v4().to_string(), "00000000-0000-4000-8000-000000000000");
    }

    /// Reports variant from the high bits of octet 8
    #[test]
    fn reports_variant_from_the_high_bits_of_octet_8() {
        assert_eq!(Uuid::NIL.variant(), Variant::Var0);
        assert_eq!(Uuid::NIL.version(), None);
        assert_eq!(Uuid::MAX.variant(), Variant::VarReserved);
        assert_eq!(Uuid::from(0xc0u128 << 56).variant(), Variant::Var110);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        let e = Uuid::from(0x017f_22e2_79b0_7cc3_98c4_dc0c_0c07_398fu128);
        assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
        assert_eq!(Uuid::from(u128::from(e)), e);
        assert_eq!(AsRef::<[u8]>::as_ref(&e), &e.as_bytes()[..]);
        #[cfg(feature = "uuid")]
        assert_eq!(Uuid::from(uuid::Uuid::from(e)), e);
        #[cfg(feature = "uuid")]
        assert_eq!(uuid::Uuid::from(e).to_string(), e.to_string());
    }
}
