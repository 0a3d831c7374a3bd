//! Collision-resistant, fixed-length identifiers in lowercase base-36.
//!
//! A [`Cuid`] is assembled from four parts: the current time, a short host
//! fingerprint, a rolling per-generator counter, and a block of random
//! characters. The parts are interleaved so their boundaries are not visible
//! in the output.
//!
//! # Example
//!
//! ```
//! use cuidgen::{cuid, is_cuid};
//!
//! let id = cuid();
//! assert_eq!(id.as_str().len(), 24);
//! assert!(is_cuid(&id));
//! ```
//!
//! Generators can be built with an explicit clock and random source, which is
//! how deterministic sequences are produced in tests:
//!
//! ```
//! use cuidgen::{BasicCuidGenerator, CuidConfig, RandSource, TimeSource};
//!
//! struct FixedTime;
//! impl TimeSource<u64> for FixedTime {
//!     fn current_millis(&self) -> u64 {
//!         1_700_000_000_000
//!     }
//! }
//!
//! struct FixedRand;
//! impl RandSource for FixedRand {
//!     fn rand(&self) -> f64 {
//!         0.5
//!     }
//! }
//!
//! let config = CuidConfig::default()
//!     .with_counter_seed("0000")
//!     .with_fingerprint("ab12");
//! let generator = BasicCuidGenerator::from_config(config, FixedTime, FixedRand).unwrap();
//! assert_eq!(generator.create().as_str().len(), 24);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base36;
mod error;
mod fingerprint;
mod generator;
mod id;
mod rand;
mod time;
mod validate;

pub use crate::error::*;
pub use crate::fingerprint::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
pub use crate::validate::*;
