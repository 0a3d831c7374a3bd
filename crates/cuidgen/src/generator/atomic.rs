use crate::{
    Cuid, CuidConfig, CuidGenerator, Environment, Fingerprint, HostEnvironment, RandSource,
    Result, SecureRandom, TimeSource, WallClock,
    generator::{
        compose::{assemble, next_counter},
        config::Parts,
    },
    is_cuid_with_length,
};
use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// A lock-free cuid generator suitable for multi-threaded environments.
///
/// The counter is an [`AtomicU32`] advanced with a compare-and-swap loop, so
/// each counter value is handed out to exactly one caller per wrap.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Lock-free, infallible
///
/// ## See Also
/// - [`BasicCuidGenerator`]
/// - [`LockCuidGenerator`]
///
/// [`BasicCuidGenerator`]: crate::BasicCuidGenerator
/// [`LockCuidGenerator`]: crate::LockCuidGenerator
pub struct AtomicCuidGenerator<T = WallClock, R = SecureRandom>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    counter: AtomicU32,
    length: usize,
    fingerprint: Fingerprint,
    clock: T,
    rng: R,
}

impl Default for AtomicCuidGenerator {
    fn default() -> Self {
        Self::new(WallClock, SecureRandom::new())
    }
}

impl<T, R> AtomicCuidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource,
{
    /// Creates a new [`AtomicCuidGenerator`] with the default configuration.
    ///
    /// # Example
    /// ```
    /// use cuidgen::{AtomicCuidGenerator, ThreadRandom, WallClock};
    ///
    /// let generator = AtomicCuidGenerator::new(WallClock, ThreadRandom);
    /// assert_eq!(generator.create().len(), 24);
    /// ```
    pub fn new(clock: T, rng: R) -> Self {
        let parts = Parts::defaults(&rng, &HostEnvironment);
        Self::from_parts(parts, clock, rng)
    }

    /// Creates a generator from an explicit [`CuidConfig`].
    ///
    /// # Errors
    /// - Returns [`crate::Error::Config`] if the config is rejected.
    pub fn from_config(config: CuidConfig, clock: T, rng: R) -> Result<Self> {
        Self::with_environment(config, clock, rng, &HostEnvironment)
    }

    /// Like [`Self::from_config`], reading fingerprint sources from `env`.
    ///
    /// # Errors
    /// - Returns [`crate::Error::Config`] if the config is rejected.
    pub fn with_environment<E>(config: CuidConfig, clock: T, rng: R, env: &E) -> Result<Self>
    where
        E: Environment + ?Sized,
    {
        let parts = config.resolve(&rng, env)?;
        Ok(Self::from_parts(parts, clock, rng))
    }

    fn from_parts(parts: Parts, clock: T, rng: R) -> Self {
        Self {
            counter: AtomicU32::new(parts.counter),
            length: parts.length,
            fingerprint: parts.fingerprint,
            clock,
            rng,
        }
    }

    /// Generates a new identifier.
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
        let counter = self.advance();
        Ok(assemble(
            millis,
            self.fingerprint.as_str(),
            counter,
            self.length,
            &self.rng,
        ))
    }

    /// Claims the next counter value.
    fn advance(&self) -> u32 {
        let mut current = self.counter.load(Ordering::Relaxed);
        loop {
            let next = next_counter(current);
            match self.counter.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break next,
                Err(actual) => {
                    current = actual;
                    core::hint::spin_loop();
                }
            }
        }
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

impl<T, R> CuidGenerator<T, R> for AtomicCuidGenerator<T, R>
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
