use crate::{Error, base36, is_cuid};
use core::{borrow::Borrow, fmt, str::FromStr};

/// A generated identifier.
///
/// An opaque, immutable string over `[0-9a-z]`. Two identifiers are equal iff
/// their strings are equal. Ordering is plain string ordering and carries no
/// meaning about creation time: the components are interleaved.
///
/// Parsing with [`FromStr`] accepts any non-empty lower-case base-36 string,
/// since generators may be configured with a custom length. Use
/// [`Cuid::is_valid`] to check for the default shape.
///
/// # Example
/// ```
/// use cuidgen::Cuid;
///
/// let id: Cuid = "tz4a98xxat96iws9zmbrgj3a".parse().unwrap();
/// assert!(id.is_valid());
/// assert_eq!(id.to_string(), "tz4a98xxat96iws9zmbrgj3a");
///
/// assert!("not-a-cuid".parse::<Cuid>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cuid(String);

impl Cuid {
    /// Wraps characters produced by a generator.
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(value.bytes().all(base36::is_digit));
        Self(value)
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if this identifier has the default shape
    /// ([`crate::DEFAULT_LENGTH`] characters).
    pub fn is_valid(&self) -> bool {
        is_cuid(&self.0)
    }

    /// Number of characters in the identifier.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the identifier has no characters. Parsed and
    /// generated identifiers never do.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Cuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(base36::is_digit) {
            return Err(Error::InvalidCuid {
                value: s.to_owned(),
            });
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for Cuid {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() || !value.bytes().all(base36::is_digit) {
            return Err(Error::InvalidCuid { value });
        }
        Ok(Self(value))
    }
}

impl From<Cuid> for String {
    fn from(id: Cuid) -> Self {
        id.0
    }
}

impl AsRef<str> for Cuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for Cuid {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Borrow<str> for Cuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Cuid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Cuid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
mod serde_impl {
    use super::Cuid;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Cuid {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.0)
        }
    }

    impl<'de> Deserialize<'de> for Cuid {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let value = String::deserialize(d)?;
            Cuid::try_from(value).map_err(serde::de::Error::custom)
        }
    }
}
