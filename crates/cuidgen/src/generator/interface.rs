use crate::{Cuid, CuidConfig, Fingerprint, RandSource, TimeSource, is_cuid_with_length};
use core::fmt;

/// A minimal interface for generating cuids
pub trait CuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    type Err: fmt::Debug;

    /// Creates a new generator with the default configuration
    fn new(clock: T, rng: R) -> Self;

    /// Creates a new generator from an explicit config
    ///
    /// # Errors
    /// - Returns [`crate::Error::Config`] if the config is rejected.
    fn from_config(config: CuidConfig, clock: T, rng: R) -> crate::Result<Self>
    where
        Self: Sized;

    /// Returns the next identifier
    fn create(&self) -> Cuid;

    /// A fallible version of [`Self::create`] that returns a [`Result`].
    ///
    /// # Errors
    /// - May return an error if the underlying generator uses a lock and it is
    ///   poisoned.
    fn try_create(&self) -> Result<Cuid, Self::Err>;

    /// The configured identifier length.
    fn length(&self) -> usize;

    /// The fingerprint embedded in every identifier.
    fn fingerprint(&self) -> &Fingerprint;

    /// Structural check against this generator's configured length.
    fn is_valid(&self, value: impl AsRef<[u8]>) -> bool {
        is_cuid_with_length(value, self.length())
    }
}
