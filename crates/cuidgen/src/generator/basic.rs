use crate::{
    Cuid, CuidConfig, CuidGenerator, Environment, Fingerprint, HostEnvironment, RandSource,
    Result, SecureRandom, TimeSource, WallClock,
    generator::{
        compose::{assemble, next_counter},
        config::Parts,
    },
    is_cuid_with_length,
};
use core::cell::Cell;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A cuid generator for single-threaded use.
///
/// The counter lives in a [`Cell`], so the generator is `Send` but not `Sync`:
/// the compiler rules out unsynchronized sharing. Give each thread its own
/// instance, or use [`LockCuidGenerator`] / [`AtomicCuidGenerator`] when one
/// instance must be shared.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Infallible
/// - ✅ Deterministic given a deterministic clock and random source
///
/// [`LockCuidGenerator`]: crate::LockCuidGenerator
/// [`AtomicCuidGenerator`]: crate::AtomicCuidGenerator
pub struct BasicCuidGenerator<T = WallClock, R = SecureRandom>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    counter: Cell<u32>,
    length: usize,
    fingerprint: Fingerprint,
    clock: T,
    rng: R,
}

impl Default for BasicCuidGenerator {
    /// A generator on the wall clock and [`SecureRandom`], with a random
    /// starting counter and a host-derived fingerprint.
    fn default() -> Self {
        Self::new(WallClock, SecureRandom::new())
    }
}

impl<T, R> BasicCuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    /// Creates a new [`BasicCuidGenerator`] with the default configuration.
    ///
    /// # Parameters
    /// - `clock`: A [`TimeSource`] used to retrieve the current timestamp
    /// - `rng`: A [`RandSource`] used for the random block, the starting
    ///   counter, and any fingerprint fallback
    ///
    /// # Example
    /// ```
    /// use cuidgen::{BasicCuidGenerator, SecureRandom, WallClock};
    ///
    /// let generator = BasicCuidGenerator::new(WallClock, SecureRandom::new());
    /// let id = generator.create();
    /// assert!(generator.is_valid(&id));
    /// ```
    ///
    /// [`TimeSource`]: crate::TimeSource
    /// [`RandSource`]: crate::RandSource
    pub fn new(clock: T, rng: R) -> Self {
        let parts = Parts::defaults(&rng, &HostEnvironment);
        Self::from_parts(parts, clock, rng)
    }

    /// Creates a generator from an explicit [`CuidConfig`].
    ///
    /// # Errors
    /// - [`crate::ConfigError::LengthTooShort`] if the length is below
    ///   [`crate::MIN_LENGTH`]
    /// - [`crate::ConfigError::InvalidCounterSeed`] if the seed is not
    ///   base 36
    /// - [`crate::ConfigError::InvalidFingerprint`] if the override is not
    ///   `[0-9a-z]`
    pub fn from_config(config: CuidConfig, clock: T, rng: R) -> Result<Self> {
        Self::with_environment(config, clock, rng, &HostEnvironment)
    }

    /// Like [`Self::from_config`], reading fingerprint sources from `env`.
    ///
    /// # Errors
    /// Same as [`Self::from_config`].
    pub fn with_environment<E>(config: CuidConfig, clock: T, rng: R, env: &E) -> Result<Self>
    where
        E: Environment + ?Sized,
    {
        let parts = config.resolve(&rng, env)?;
        Ok(Self::from_parts(parts, clock, rng))
    }

    fn from_parts(parts: Parts, clock: T, rng: R) -> Self {
        Self {
            counter: Cell::new(parts.counter),
            length: parts.length,
            fingerprint: parts.fingerprint,
            clock,
            rng,
        }
    }

    /// Generates a new identifier, advancing the counter by one.
    ///
    /// # Example
    /// ```
    /// use cuidgen::BasicCuidGenerator;
    ///
    /// let generator: BasicCuidGenerator = BasicCuidGenerator::default();
    /// let a = generator.create();
    /// let b = generator.create();
    /// assert_ne!(a, b);
    /// ```
    pub fn create(&self) -> Cuid {
        match self.try_create() {
            Ok(id) => id,
            Err(e) =>
            {
                #[allow(unreachable_code)]
                match e {}
            }
        }
    }

    /// Generates a new identifier.
    ///
    /// # Errors
    ///
    /// This method is infallible for this generator. Use the [`Self::create`]
    /// method instead.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_create(&self) -> Result<Cuid, core::convert::Infallible> {
        let millis = self.clock.current_millis();
        let counter = next_counter(self.counter.get());
        self.counter.set(counter);
        Ok(assemble(
            millis,
            self.fingerprint.as_str(),
            counter,
            self.length,
            &self.rng,
        ))
    }

    /// The configured identifier length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The fingerprint embedded in every identifier.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// The random source, e.g. to audit [`SecureRandom::entropy`].
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Structural check against this generator's configured length.
    pub fn is_valid(&self, value: impl AsRef<[u8]>) -> bool {
        is_cuid_with_length(value, self.length)
    }
}

impl<T, R> CuidGenerator<T, R> for BasicCuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    type Err = core::convert::Infallible;

    fn new(clock: T, rng: R) -> Self {
        Self::new(clock, rng)
    }

    fn from_config(config: CuidConfig, clock: T, rng: R) -> Result<Self> {
        Self::from_config(config, clock, rng)
    }

    fn create(&self) -> Cuid {
        self.create()
    }

    fn try_create(&self) -> Result<Cuid, Self::Err> {
        self.try_create()
    }

    fn length(&self) -> usize {
        self.length()
    }

    fn fingerprint(&self) -> &Fingerprint {
        self.fingerprint()
    }
}
