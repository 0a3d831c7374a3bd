use core::fmt;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `cuidgen` can produce.
///
/// Generation itself never fails for a successfully constructed generator
/// (with the exception of a poisoned lock). Errors surface at construction
/// time, through [`Error::Config`], or when parsing a [`crate::Cuid`] from
/// untrusted input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The generator configuration was rejected.
    ///
    /// Fatal to that construction attempt. Retrying with the same
    /// configuration fails the same way.
    Config(ConfigError),

    /// A string could not be parsed as a [`crate::Cuid`].
    InvalidCuid {
        /// The rejected input.
        value: String,
    },

    /// The operation failed because the counter lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
    #[cfg(all(feature = "lock", not(feature = "parking-lot")))]
    LockPoisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Config(err) => write!(fmt, "invalid generator configuration: {err}"),
            Self::InvalidCuid { value } => write!(fmt, "not a cuid: {value:?}"),
            #[cfg(all(feature = "lock", not(feature = "parking-lot")))]
            Self::LockPoisoned => write!(fmt, "counter lock poisoned"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

/// Reasons a [`crate::CuidConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested identifier length is below the supported minimum.
    LengthTooShort {
        /// The requested length.
        length: usize,
        /// The smallest accepted length.
        min: usize,
    },

    /// The requested identifier length is above the supported maximum.
    LengthTooLong {
        /// The requested length.
        length: usize,
        /// The largest accepted length.
        max: usize,
    },

    /// The counter seed is not a base-36 number that fits in 64 bits.
    InvalidCounterSeed {
        /// The rejected seed.
        seed: String,
    },

    /// The fingerprint override is empty or contains characters outside
    /// `[0-9a-z]`.
    InvalidFingerprint {
        /// The rejected fingerprint.
        fingerprint: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::LengthTooShort { length, min } => {
                write!(fmt, "length {length} is below the minimum of {min}")
            }
            Self::LengthTooLong { length, max } => {
                write!(fmt, "length {length} is above the maximum of {max}")
            }
            Self::InvalidCounterSeed { seed } => {
                write!(fmt, "counter seed {seed:?} is not a base-36 number")
            }
            Self::InvalidFingerprint { fingerprint } => {
                write!(fmt, "fingerprint {fingerprint:?} must be non-empty [0-9a-z]")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
