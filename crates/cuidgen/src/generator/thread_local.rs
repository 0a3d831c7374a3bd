//! Thread-local cuid generation.
//!
//! Each OS thread lazily builds its own default [`BasicCuidGenerator`] on
//! first use: wall clock, [`SecureRandom`](crate::SecureRandom), random
//! starting counter, host-derived fingerprint. Threads never share counter
//! state, so no synchronization is involved.
//!
//! # Example
//! ```rust
//! use cuidgen::{cuid, is_cuid};
//!
//! let id = cuid();
//! assert!(is_cuid(&id));
//! ```

use crate::{BasicCuidGenerator, Cuid};

thread_local! {
    static DEFAULT_CUID: BasicCuidGenerator = BasicCuidGenerator::default();
}

/// Generates a cuid with the default configuration.
///
/// Convenient for callers that do not want to manage a generator. For custom
/// lengths, injected clocks, or fingerprint overrides, build a
/// [`BasicCuidGenerator`] instead.
pub fn cuid() -> Cuid {
    DEFAULT_CUID.with(BasicCuidGenerator::create)
}
