use anyhow::bail;
use clap::{Parser, Subcommand};
use cuidgen::{CuidConfig, DEFAULT_LENGTH, Fingerprint, MAX_LENGTH, MIN_LENGTH};

/// Command-line arguments for the `cuidgen` binary.
///
/// Every option can also be supplied through the environment variable named
/// in its help text. A `.env` file in the working directory is loaded before
/// parsing.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cuidgen",
    version,
    about = "Generate and check collision-resistant CUID2-style identifiers"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print new identifiers, one per line.
    New {
        /// Number of identifiers to print.
        ///
        /// Environment variable: `CUID_COUNT`
        #[arg(short = 'n', long, env = "CUID_COUNT", default_value_t = 1)]
        count: usize,

        /// Length of each identifier.
        ///
        /// Values below the width of the time, fingerprint, and counter
        /// blocks yield longer identifiers: those blocks are never cut.
        ///
        /// Environment variable: `CUID_LENGTH`
        #[arg(short, long, env = "CUID_LENGTH", default_value_t = DEFAULT_LENGTH)]
        length: usize,

        /// Fixed host fingerprint (lowercase base-36 characters)
        /// instead of one derived from this machine.
        ///
        /// Environment variable: `CUID_FINGERPRINT`
        #[arg(short, long, env = "CUID_FINGERPRINT")]
        fingerprint: Option<String>,
    },

    /// Report whether each value is structurally a cuid.
    ///
    /// Prints `<value>\tvalid` or `<value>\tinvalid` per value and exits with
    /// a failure status when any value is invalid.
    Check {
        /// Values to check.
        #[arg(required = true)]
        values: Vec<String>,

        /// Expected identifier length.
        ///
        /// Environment variable: `CUID_LENGTH`
        #[arg(short, long, env = "CUID_LENGTH", default_value_t = DEFAULT_LENGTH)]
        length: usize,
    },
}

/// Validated settings for `cuidgen new`.
#[derive(Debug, Clone)]
pub struct NewConfig {
    pub count: usize,
    pub cuid: CuidConfig,
}

/// Validated settings for `cuidgen check`.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub values: Vec<String>,
    pub length: usize,
}

#[derive(Debug, Clone)]
pub enum RunConfig {
    New(NewConfig),
    Check(CheckConfig),
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        match args.command {
            Command::New {
                count,
                length,
                fingerprint,
            } => {
                if count == 0 {
                    bail!("CUID_COUNT must be greater than 0");
                }
                if length < MIN_LENGTH {
                    bail!("CUID_LENGTH ({length}) is below the minimum of {MIN_LENGTH}");
                }
                if length > MAX_LENGTH {
                    bail!("CUID_LENGTH ({length}) exceeds the maximum of {MAX_LENGTH}");
                }

                let mut cuid = CuidConfig::new().with_length(length);
                if let Some(fingerprint) = fingerprint {
                    Fingerprint::from_override(&fingerprint)?;
                    cuid = cuid.with_fingerprint(fingerprint);
                }

                Ok(Self::New(NewConfig { count, cuid }))
            }
            Command::Check { values, length } => {
                if length == 0 {
                    bail!("CUID_LENGTH must be greater than 0");
                }
                Ok(Self::Check(CheckConfig { values, length }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<RunConfig> {
        let args = CliArgs::try_parse_from(core::iter::once("cuidgen").chain(args.iter().copied()))?;
        RunConfig::try_from(args)
    }

    #[test]
    fn new_defaults() {
        let RunConfig::New(config) = parse(&["new"]).unwrap() else {
            panic!("expected `new`");
        };
        assert_eq!(config.count, 1);
        assert_eq!(config.cuid.length, Some(DEFAULT_LENGTH));
        assert_eq!(config.cuid.fingerprint, None);
    }

    #[test]
    fn new_with_options() {
        let RunConfig::New(config) =
            parse(&["new", "-n", "5", "--length", "32", "--fingerprint", "ab12"]).unwrap()
        else {
            panic!("expected `new`");
        };
        assert_eq!(config.count, 5);
        assert_eq!(config.cuid.length, Some(32));
        assert_eq!(config.cuid.fingerprint.as_deref(), Some("ab12"));
    }

    #[test]
    fn new_rejects_bad_values() {
        assert!(parse(&["new", "--count", "0"]).is_err());
        assert!(parse(&["new", "--length", "1"]).is_err());
        assert!(parse(&["new", "--length", "4097"]).is_err());
        assert!(parse(&["new", "--length", "4096"]).is_ok());
        assert!(parse(&["new", "--fingerprint", "AB12"]).is_err());
        assert!(parse(&["new", "--fingerprint", "ab-1"]).is_err());
        assert!(parse(&["new", "--count", "-3"]).is_err());
    }

    #[test]
    fn check_requires_values() {
        assert!(parse(&["check"]).is_err());

        let RunConfig::Check(config) = parse(&["check", "a", "b", "-l", "2"]).unwrap() else {
            panic!("expected `check`");
        };
        assert_eq!(config.values, ["a", "b"]);
        assert_eq!(config.length, 2);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(parse(&["decode", "abc"]).is_err());
        assert!(parse(&[]).is_err());
    }
}
