use super::config::{CheckConfig, NewConfig};
use cuidgen::{
    BasicCuidGenerator, CuidGenerator, EntropySource, FingerprintOrigin, RandSource,
    SecureRandom, TimeSource, WallClock, is_cuid_with_length,
};
use std::io::Write;

/// Writes `config.count` fresh identifiers to `out`, one per line.
pub fn generate(config: &NewConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let generator =
        BasicCuidGenerator::from_config(config.cuid.clone(), WallClock, SecureRandom::new())?;
    write_ids(&generator, config.count, out)?;

    if generator.rng().entropy() == EntropySource::Fallback {
        tracing::warn!("identifiers were produced without operating-system randomness");
    }
    Ok(())
}

fn write_ids<G, T, R>(generator: &G, count: usize, out: &mut impl Write) -> anyhow::Result<()>
where
    G: CuidGenerator<T, R>,
    T: TimeSource<u64>,
    R: RandSource,
{
    let fingerprint = generator.fingerprint();
    if fingerprint.origin() == FingerprintOrigin::Random {
        tracing::info!(
            fingerprint = fingerprint.as_str(),
            "host facts unavailable, using a random fingerprint"
        );
    }
    for _ in 0..count {
        writeln!(out, "{}", generator.create())?;
    }
    Ok(())
}

/// Writes one `<value>\t<verdict>` line per value. Returns `true` when every
/// value is valid.
pub fn check(config: &CheckConfig, out: &mut impl Write) -> anyhow::Result<bool> {
    let mut all_valid = true;
    for value in &config.values {
        let valid = is_cuid_with_length(value, config.length);
        all_valid &= valid;
        let verdict = if valid { "valid" } else { "invalid" };
        writeln!(out, "{value}\t{verdict}")?;
    }
    Ok(all_valid)
}
