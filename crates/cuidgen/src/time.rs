use std::time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The timestamp type `T` is generic (generators in this crate use `u64`), and
/// the unit is expected to be **milliseconds** since the Unix epoch.
///
/// # Example
///
/// ```
/// use cuidgen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

/// A [`TimeSource`] backed by [`SystemTime::now`].
///
/// The clock is not monotonic: it follows wall-clock adjustments. Identifiers
/// do not rely on monotonic time since the counter and random block keep them
/// apart. A system clock set before 1970 reads as `0`.
#[derive(Default, Clone, Copy, Debug)]
pub struct WallClock;

impl TimeSource<u64> for WallClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(WallClock.current_millis() > 1_577_836_800_000);
    }

    #[test]
    fn wall_clock_does_not_jump_backwards_between_reads() {
        let a = WallClock.current_millis();
        let b = WallClock.current_millis();
        assert!(b + 1_000 >= a);
    }
}
