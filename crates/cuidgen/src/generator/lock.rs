use crate::{
    Cuid, CuidConfig, CuidGenerator, Environment, Error, Fingerprint, HostEnvironment,
    RandSource, Result, SecureRandom, TimeSource, WallClock,
    generator::{
        Mutex,
        compose::{assemble, next_counter},
        config::Parts,
    },
    is_cuid_with_length,
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A cuid generator suitable for multi-threaded environments.
///
/// The counter is held behind a mutex, so one instance can be shared by
/// reference (or in an `Arc`) across threads. The clock read and random draws
/// happen outside the lock; only the counter increment is serialized.
///
/// With the `parking-lot` feature the mutex cannot poison and
/// [`Self::try_create`] never fails.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Counter values are handed out exactly once per wrap
///
/// ## See Also
/// - [`BasicCuidGenerator`]
/// - [`AtomicCuidGenerator`]
///
/// [`BasicCuidGenerator`]: crate::BasicCuidGenerator
/// [`AtomicCuidGenerator`]: crate::AtomicCuidGenerator
pub struct LockCuidGenerator<T = WallClock, R = SecureRandom>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    counter: Mutex<u32>,
    length: usize,
    fingerprint: Fingerprint,
    clock: T,
    rng: R,
}

impl Default for LockCuidGenerator {
    fn default() -> Self {
        Self::new(WallClock, SecureRandom::new())
    }
}

impl<T, R> LockCuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    /// Creates a new [`LockCuidGenerator`] with the default configuration.
    ///
    /// # Example
    /// ```
    /// use cuidgen::{LockCuidGenerator, SecureRandom, WallClock};
    ///
    /// let generator = LockCuidGenerator::new(WallClock, SecureRandom::new());
    /// std::thread::scope(|s| {
    ///     s.spawn(|| generator.create());
    ///     s.spawn(|| generator.create());
    /// });
    /// ```
    pub fn new(clock: T, rng: R) -> Self {
        let parts = Parts::defaults(&rng, &HostEnvironment);
        Self::from_parts(parts, clock, rng)
    }

    /// Creates a generator from an explicit [`CuidConfig`].
    ///
    /// # Errors
    /// - Returns [`Error::Config`] if the config is rejected.
    pub fn from_config(config: CuidConfig, clock: T, rng: R) -> Result<Self> {
        Self::with_environment(config, clock, rng, &HostEnvironment)
    }

    /// Like [`Self::from_config`], reading fingerprint sources from `env`.
    ///
    /// # Errors
    /// - Returns [`Error::Config`] if the config is rejected.
    pub fn with_environment<E>(config: CuidConfig, clock: T, rng: R, env: &E) -> Result<Self>
    where
        E: Environment + ?Sized,
    {
        let parts = config.resolve(&rng, env)?;
        Ok(Self::from_parts(parts, clock, rng))
    }

    fn from_parts(parts: Parts, clock: T, rng: R) -> Self {
        Self {
            counter: Mutex::new(parts.counter),
            length: parts.length,
            fingerprint: parts.fingerprint,
            clock,
            rng,
        }
    }

    /// Generates a new identifier.
    ///
    /// # Panics
    /// Panics if the lock is poisoned. For explicitly fallible behavior, use
    /// [`Self::try_create`] instead.
    pub fn create(&self) -> Cuid {
        match self.try_create() {
            Ok(id) => id,
            Err(e) => panic!("failed to create cuid: {e}"),
        }
    }

    /// Attempts to generate a new identifier.
    ///
    /// # Errors
    /// - Returns [`Error::LockPoisoned`] if another thread panicked while
    ///   holding the counter lock (std mutex only).
    ///
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_create(&self) -> Result<Cuid, Error> {
        let millis = self.clock.current_millis();
        let counter = {
            let mut guard = {
                #[cfg(feature = "parking-lot")]
                {
                    self.counter.lock()
                }
                #[cfg(not(feature = "parking-lot"))]
                {
                    self.counter.lock()?
                }
            };
            *guard = next_counter(*guard);
            *guard
        };
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

impl<T, R> CuidGenerator<T, R> for LockCuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    type Err = Error;

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
