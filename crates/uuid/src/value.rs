//! The 16-byte identifier value.

use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// A 128-bit identifier held as 16 raw bytes.
///
/// No substructure is interpreted: version and variant bits are carried through untouched.
/// Equality and hashing are byte-wise.
///
/// # Text form
/// [`Display`](fmt::Display) and [`Uuid::to_text`] produce the canonical
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form. [`FromStr`] and [`Uuid::parse_str`] accept
/// exactly that form (hex digits in either case) and nothing else.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Wraps 16 raw bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// The all-zero identifier.
    pub const fn nil() -> Self {
        Self([0; 16])
    }

    /// Copies an identifier out of a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidLength`] if `bytes` is not exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> UuidResult<Self> {
        let array: [u8; 16] = bytes
            .try_into()
            .map_err(|_| UuidError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(value: Uuid) -> Self {
        value.0
    }
}

impl From<::uuid::Uuid> for Uuid {
    fn from(value: ::uuid::Uuid) -> Self {
        Self(*value.as_bytes())
    }
}

impl From<Uuid> for ::uuid::Uuid {
    fn from(value: Uuid) -> Self {
        ::uuid::Uuid::from_bytes(value.0)
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({})", self.to_text())
    }
}

impl FromStr for Uuid {
    type Err = UuidError;

    /// Parses a string that must be exactly one canonical UUID.
    ///
    /// This is equivalent to calling [`Uuid::parse_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut buf = [0u8; crate::TEXT_LEN];
        serializer.serialize_str(self.encode_lower(&mut buf))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Uuid::parse_str(&s).map_err(serde::de::Error::custom)
    }
}
