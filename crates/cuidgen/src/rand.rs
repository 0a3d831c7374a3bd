use ::rand::{Rng, SeedableRng, TryRngCore, rngs::OsRng, rngs::SmallRng};
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// A trait for random sources that return uniform values in `[0, 1)`.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// Values outside `[0, 1)` are tolerated by the generators (they are clamped)
/// but they skew the distribution, so implementations should not produce them.
///
/// # Example
/// ```
/// use cuidgen::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand(&self) -> f64 {
///         0.25
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 0.25);
/// ```
pub trait RandSource {
    /// Returns a uniform value in `[0, 1)`.
    fn rand(&self) -> f64;
}

/// Maps 64 random bits onto `[0, 1)` using the top 53 bits.
#[inline]
fn unit_from_bits(bits: u64) -> f64 {
    const SCALE: f64 = 1.0 / (1_u64 << 53) as f64;
    (bits >> 11) as f64 * SCALE
}

/// Computes `floor(rng.rand() * bound)`, clamped into `0..bound`.
///
/// NaN and negative draws map to `0`, draws at or above `1.0` map to
/// `bound - 1`.
#[inline]
pub(crate) fn draw_below<R: RandSource + ?Sized>(rng: &R, bound: u64) -> u64 {
    debug_assert!(bound > 0);
    // `as` saturates: NaN and negatives become 0.
    let scaled = (rng.rand() * bound as f64) as u64;
    scaled.min(bound - 1)
}

/// Where a [`SecureRandom`] has drawn its values from so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntropySource {
    /// Every draw came from the operating system's secure source.
    Os,
    /// At least one draw came from the non-cryptographic fallback.
    Fallback,
}

/// A [`RandSource`] reading from the operating system's secure random source.
///
/// If the OS source fails (for example inside a restricted sandbox), the draw
/// is silently served by a non-cryptographic [`SmallRng`] seeded from the
/// wall clock and process id. Generation never fails because of it. Use
/// [`SecureRandom::entropy`] to find out whether the fallback was ever used.
#[derive(Debug, Default)]
pub struct SecureRandom {
    fallback: Mutex<Option<SmallRng>>,
    degraded: AtomicBool,
}

impl SecureRandom {
    /// Creates a new source. No randomness is read until the first draw.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether any draw so far had to use the fallback generator.
    pub fn entropy(&self) -> EntropySource {
        if self.degraded.load(Ordering::Relaxed) {
            EntropySource::Fallback
        } else {
            EntropySource::Os
        }
    }

    #[cold]
    fn fallback_rand(&self) -> f64 {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            #[cfg(feature = "tracing")]
            tracing::warn!("secure random source unavailable, using non-cryptographic fallback");
        }
        let mut guard = self
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        guard
            .get_or_insert_with(|| SmallRng::seed_from_u64(fallback_seed()))
            .random::<f64>()
    }
}

fn fallback_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    nanos ^ (u64::from(std::process::id()) << 32)
}

impl RandSource for SecureRandom {
    fn rand(&self) -> f64 {
        match OsRng.try_next_u64() {
            Ok(bits) => unit_from_bits(bits),
            Err(_) => self.fallback_rand(),
        }
    }
}

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically. Unlike [`SecureRandom`] it has no fallback: seeding
/// panics if the OS source is unavailable.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free. This type does **not** store the RNG itself; it simply
/// accesses the thread-local generator on each call.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand(&self) -> f64 {
        ::rand::rng().random()
    }
}
