//! Host fingerprinting.
//!
//! A fingerprint is a short base-36 string folded from a handful of
//! environment readings. It lowers the odds that two processes generating at
//! the same millisecond with the same counter collide. It is not an identity
//! and makes no uniqueness claim of its own.

use crate::{ConfigError, RandSource, base36, rand::draw_below};
use std::sync::LazyLock;
use std::time::Instant;

/// Fewest characters a derived fingerprint may have.
pub const FINGERPRINT_MIN_LEN: usize = 2;
/// Most characters a derived fingerprint may have.
pub const FINGERPRINT_MAX_LEN: usize = 4;

/// Reference point for [`HostEnvironment::uptime_secs`]: the first time it is
/// read, not process start.
static FIRST_UPTIME_READ: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Read access to the environment facts a fingerprint is derived from.
///
/// Each reading is optional: `None` marks a source as unavailable, which makes
/// [`Fingerprint::derive`] fall back to random characters.
pub trait Environment {
    /// The current process id.
    fn process_id(&self) -> Option<u64>;
    /// The number of characters in the host name.
    fn hostname_len(&self) -> Option<u64>;
    /// The number of logical CPUs.
    fn cpu_count(&self) -> Option<u64>;
    /// Total system memory in bytes.
    fn total_memory(&self) -> Option<u64>;
    /// Whole seconds the process has been running. Implementations may
    /// approximate; see [`HostEnvironment`].
    fn uptime_secs(&self) -> Option<u64>;
}

/// The [`Environment`] of the running process.
///
/// - Host name via the `hostname` crate.
/// - CPU count via `num_cpus` (logical CPUs).
/// - Total memory from `/proc/meminfo`. This reading only exists on Linux: on
///   every other platform `total_memory` is `None`, so fingerprints derived
///   from this environment there always take the
///   [`FingerprintOrigin::Random`] fallback. Pass a custom [`Environment`] or
///   a fingerprint override to get a stable fingerprint on those hosts.
/// - Uptime is the number of seconds since the first fingerprint reading in
///   this process, not since the process started. The first derivation
///   therefore reads `0`.
#[derive(Default, Clone, Copy, Debug)]
pub struct HostEnvironment;

impl Environment for HostEnvironment {
    fn process_id(&self) -> Option<u64> {
        Some(u64::from(std::process::id()))
    }

    fn hostname_len(&self) -> Option<u64> {
        let name = hostname::get().ok()?;
        Some(name.to_string_lossy().chars().count() as u64)
    }

    fn cpu_count(&self) -> Option<u64> {
        Some(num_cpus::get() as u64)
    }

    fn total_memory(&self) -> Option<u64> {
        total_memory()
    }

    fn uptime_secs(&self) -> Option<u64> {
        Some(FIRST_UPTIME_READ.elapsed().as_secs())
    }
}

#[cfg(target_os = "linux")]
fn total_memory() -> Option<u64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    parse_mem_total(&meminfo)
}

#[cfg(not(target_os = "linux"))]
fn total_memory() -> Option<u64> {
    None
}

/// Extracts `MemTotal` (reported in kB) from `/proc/meminfo`, in bytes.
#[cfg_attr(not(any(target_os = "linux", test)), allow(dead_code))]
fn parse_mem_total(meminfo: &str) -> Option<u64> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kib: u64 = line
        .trim_start_matches("MemTotal:")
        .split_whitespace()
        .next()?
        .parse()
        .ok()?;
    kib.checked_mul(1024)
}

/// How a [`Fingerprint`] came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerprintOrigin {
    /// Folded from environment readings.
    Environment,
    /// At least one environment reading was unavailable; random characters
    /// were used instead.
    Random,
    /// Supplied by the caller.
    Override,
}

/// The per-generator fingerprint component of every identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    value: String,
    origin: FingerprintOrigin,
}

impl Fingerprint {
    /// Derives a fingerprint from `env`. Never fails.
    ///
    /// Each reading is reduced modulo 36 and appended: the process id, total
    /// memory and uptime in base 36, the host name length and CPU count in
    /// decimal. If any reading is unavailable, two random base-36 characters
    /// drawn from `rng` are used instead. The result is padded with `'0'` to
    /// [`FINGERPRINT_MIN_LEN`] and cut to [`FINGERPRINT_MAX_LEN`].
    pub fn derive<E, R>(env: &E, rng: &R) -> Self
    where
        E: Environment + ?Sized,
        R: RandSource + ?Sized,
    {
        let (mut value, origin) = match fold_environment(env) {
            Some(value) => (value, FingerprintOrigin::Environment),
            None => {
                let mut value = String::with_capacity(FINGERPRINT_MIN_LEN);
                for _ in 0..2 {
                    base36::push_encoded(&mut value, draw_below(rng, base36::RADIX));
                }
                (value, FingerprintOrigin::Random)
            }
        };

        while value.len() < FINGERPRINT_MIN_LEN {
            value.push('0');
        }
        // Every character is ASCII, so byte truncation is safe.
        value.truncate(FINGERPRINT_MAX_LEN);

        Self { value, origin }
    }

    /// Wraps a caller-supplied fingerprint.
    ///
    /// # Errors
    /// - Returns [`ConfigError::InvalidFingerprint`] if `value` is empty or
    ///   contains characters outside `[0-9a-z]`.
    pub fn from_override(value: &str) -> Result<Self, ConfigError> {
        if value.is_empty() || !value.bytes().all(base36::is_digit) {
            return Err(ConfigError::InvalidFingerprint {
                fingerprint: value.to_owned(),
            });
        }
        Ok(Self {
            value: value.to_owned(),
            origin: FingerprintOrigin::Override,
        })
    }

    /// The fingerprint characters.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// How this fingerprint was produced.
    pub fn origin(&self) -> FingerprintOrigin {
        self.origin
    }
}

fn fold_environment<E: Environment + ?Sized>(env: &E) -> Option<String> {
    const RADIX: u64 = base36::RADIX;
    let pid = env.process_id()?;
    let hostname_len = env.hostname_len()?;
    let cpus = env.cpu_count()?;
    let memory = env.total_memory()?;
    let uptime = env.uptime_secs()?;

    let mut out = String::with_capacity(8);
    base36::push_encoded(&mut out, pid % RADIX);
    out.push_str(&(hostname_len % RADIX).to_string());
    out.push_str(&(cpus % RADIX).to_string());
    base36::push_encoded(&mut out, memory % RADIX);
    base36::push_encoded(&mut out, uptime % RADIX);
    Some(out)
}
