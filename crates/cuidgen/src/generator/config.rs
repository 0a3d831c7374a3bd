use crate::{
    ConfigError, DEFAULT_LENGTH, Environment, Fingerprint, RandSource, base36,
    generator::compose::{COUNTER_MODULUS, MAX_LENGTH, MIN_LENGTH},
    rand::draw_below,
};

/// Construction-time settings shared by every generator.
///
/// Every field is optional; `None` selects the default. The clock and random
/// source are not part of the config: they are passed to the generator
/// constructor as type parameters.
///
/// # Example
/// ```
/// use cuidgen::{BasicCuidGenerator, CuidConfig, ConfigError, Error, ThreadRandom, WallClock};
///
/// let config = CuidConfig::default().with_length(32);
/// let generator = BasicCuidGenerator::from_config(config, WallClock, ThreadRandom).unwrap();
/// assert_eq!(generator.create().len(), 32);
///
/// let err = BasicCuidGenerator::from_config(CuidConfig::default().with_length(1), WallClock, ThreadRandom)
///     .err()
///     .unwrap();
/// assert_eq!(err, Error::Config(ConfigError::LengthTooShort { length: 1, min: 2 }));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuidConfig {
    /// Total identifier length. Defaults to [`DEFAULT_LENGTH`]; must be at
    /// least [`MIN_LENGTH`] and at most [`MAX_LENGTH`].
    pub length: Option<usize>,
    /// Starting counter, in base 36 (either case). The first identifier uses
    /// the value after it. Defaults to one random draw.
    pub counter_seed: Option<String>,
    /// Fingerprint to use instead of deriving one from the host. Must be
    /// non-empty `[0-9a-z]`.
    pub fingerprint: Option<String>,
}

impl CuidConfig {
    /// Creates a config with every field defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier length.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the starting counter.
    #[must_use]
    pub fn with_counter_seed(mut self, seed: impl Into<String>) -> Self {
        self.counter_seed = Some(seed.into());
        self
    }

    /// Overrides the derived fingerprint.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Validates the config and fills in defaults.
    ///
    /// Defaults draw from `rng` in a fixed order (counter first, then any
    /// fingerprint fallback), so a deterministic `rng` gives a deterministic
    /// generator.
    pub(crate) fn resolve<R, E>(&self, rng: &R, env: &E) -> Result<Parts, ConfigError>
    where
        R: RandSource + ?Sized,
        E: Environment + ?Sized,
    {
        let length = self.length.unwrap_or(DEFAULT_LENGTH);
        if length < MIN_LENGTH {
            return Err(ConfigError::LengthTooShort {
                length,
                min: MIN_LENGTH,
            });
        }
        if length > MAX_LENGTH {
            return Err(ConfigError::LengthTooLong {
                length,
                max: MAX_LENGTH,
            });
        }

        let counter = match &self.counter_seed {
            Some(seed) => parse_counter_seed(seed)?,
            None => random_counter(rng),
        };

        let fingerprint = match &self.fingerprint {
            Some(fingerprint) => Fingerprint::from_override(fingerprint)?,
            None => Fingerprint::derive(env, rng),
        };

        Ok(Parts::new(length, counter, fingerprint))
    }
}

/// A resolved configuration, ready to seed a generator.
#[derive(Debug)]
pub(crate) struct Parts {
    pub length: usize,
    pub counter: u32,
    pub fingerprint: Fingerprint,
}

impl Parts {
    fn new(length: usize, counter: u32, fingerprint: Fingerprint) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            length,
            fingerprint = fingerprint.as_str(),
            origin = ?fingerprint.origin(),
            "cuid generator configured"
        );
        Self {
            length,
            counter,
            fingerprint,
        }
    }

    /// The default configuration. Unlike [`CuidConfig::resolve`] this cannot
    /// fail.
    pub fn defaults<R, E>(rng: &R, env: &E) -> Self
    where
        R: RandSource + ?Sized,
        E: Environment + ?Sized,
    {
        let counter = random_counter(rng);
        let fingerprint = Fingerprint::derive(env, rng);
        Self::new(DEFAULT_LENGTH, counter, fingerprint)
    }
}

fn random_counter<R: RandSource + ?Sized>(rng: &R) -> u32 {
    // Below COUNTER_MODULUS, so it fits.
    draw_below(rng, u64::from(COUNTER_MODULUS)) as u32
}

fn parse_counter_seed(seed: &str) -> Result<u32, ConfigError> {
    let value = base36::parse(seed).ok_or_else(|| ConfigError::InvalidCounterSeed {
        seed: seed.to_owned(),
    })?;
    Ok((value % u64::from(COUNTER_MODULUS)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FingerprintOrigin, HostEnvironment};

    struct Fixed(f64);
    impl RandSource for Fixed {
        fn rand(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn defaults_fill_every_field() {
        let parts = CuidConfig::new().resolve(&Fixed(0.5), &HostEnvironment).unwrap();
        assert_eq!(parts.length, DEFAULT_LENGTH);
        assert_eq!(parts.counter, 839_808);
        assert!(parts.fingerprint.as_str().len() >= 2);
    }

    #[test]
    fn length_floor_is_two() {
        for length in [0, 1] {
            assert_eq!(
                CuidConfig::new()
                    .with_length(length)
                    .resolve(&Fixed(0.5), &HostEnvironment)
                    .unwrap_err(),
                ConfigError::LengthTooShort { length, min: 2 }
            );
        }
        assert!(
            CuidConfig::new()
                .with_length(2)
                .resolve(&Fixed(0.5), &HostEnvironment)
                .is_ok()
        );
    }

    #[test]
    fn length_ceiling_rejects_oversized_requests() {
        for length in [MAX_LENGTH + 1, usize::MAX] {
            assert_eq!(
                CuidConfig::new()
                    .with_length(length)
                    .resolve(&Fixed(0.5), &HostEnvironment)
                    .unwrap_err(),
                ConfigError::LengthTooLong {
                    length,
                    max: MAX_LENGTH
                }
            );
        }
        assert!(
            CuidConfig::new()
                .with_length(MAX_LENGTH)
                .resolve(&Fixed(0.5), &HostEnvironment)
                .is_ok()
        );
    }

    #[test]
    fn counter_seed_is_base36_modulo_block() {
        assert_eq!(parse_counter_seed("0000"), Ok(0));
        assert_eq!(parse_counter_seed("zzzz"), Ok(1_679_615));
        assert_eq!(parse_counter_seed("ZZZZ"), Ok(1_679_615));
        assert_eq!(parse_counter_seed("10000"), Ok(0));
        assert_eq!(parse_counter_seed("10001"), Ok(1));
        for bad in ["", "12-4", "zzzzzzzzzzzzzz"] {
            assert_eq!(
                parse_counter_seed(bad),
                Err(ConfigError::InvalidCounterSeed {
                    seed: bad.to_owned()
                })
            );
        }
    }

    #[test]
    fn fingerprint_override_skips_derivation() {
        let parts = CuidConfig::new()
            .with_fingerprint("zz")
            .resolve(&Fixed(0.5), &HostEnvironment)
            .unwrap();
        assert_eq!(parts.fingerprint.as_str(), "zz");
        assert_eq!(parts.fingerprint.origin(), FingerprintOrigin::Override);

        assert!(matches!(
            CuidConfig::new()
                .with_fingerprint("ZZ")
                .resolve(&Fixed(0.5), &HostEnvironment),
            Err(ConfigError::InvalidFingerprint { .. })
        ));
    }
}
