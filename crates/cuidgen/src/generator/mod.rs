#[cfg(feature = "atomic")]
mod atomic;
mod basic;
mod compose;
mod config;
mod interface;
#[cfg(feature = "lock")]
mod lock;
#[cfg(feature = "lock")]
mod mutex;
#[cfg(feature = "thread-local")]
mod thread_local;

#[cfg_attr(docsrs, doc(cfg(feature = "atomic")))]
#[cfg(feature = "atomic")]
pub use atomic::*;
pub use basic::*;
pub use compose::{COUNTER_MODULUS, COUNTER_WIDTH, MAX_LENGTH, MIN_LENGTH};
pub use config::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
#[cfg(feature = "lock")]
pub use lock::*;
#[cfg(feature = "lock")]
pub(crate) use mutex::*;
#[cfg_attr(docsrs, doc(cfg(feature = "thread-local")))]
#[cfg(feature = "thread-local")]
pub use thread_local::*;
