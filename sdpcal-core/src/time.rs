//! Run timing
//!
//! Provides a clock abstraction for bracketing the aggregation loop:
//! - Process clock (CPU time consumed by this process, for real runs)
//! - Fixed clock (for deterministic tests)
//!
//! On Unix the process clock reads `CLOCK_PROCESS_CPUTIME_ID`, so time spent
//! sleeping or descheduled is not counted. Other platforms fall back to a
//! monotonic wall clock.
//!
//! Elapsed time is reported in seconds for humans and in whole, truncated
//! microseconds for the benchmark line and the auxiliary data file.

use std::cell::Cell;
use std::time::Duration;

/// Source of elapsed processing time
pub trait CpuClock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// CPU time of the current process, anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    origin: Duration,
}

impl ProcessClock {
    /// Clock reading zero at the moment of construction
    pub fn new() -> Self {
        Self {
            origin: process_cpu_time(),
        }
    }
}

impl Default for ProcessClock {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuClock for ProcessClock {
    fn now(&self) -> Duration {
        process_cpu_time().saturating_sub(self.origin)
    }
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn process_cpu_time() -> Duration {
    use std::mem::MaybeUninit;

    let mut ts = MaybeUninit::<libc::timespec>::zeroed();

    // SAFETY: an all-zero timespec is valid and `clock_gettime` only writes
    // through the pointer it is given
    let ts = unsafe {
        if libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, ts.as_mut_ptr()) != 0 {
            return Duration::ZERO;
        }
        ts.assume_init()
    };

    Duration::new(ts.tv_sec.max(0) as u64, ts.tv_nsec.clamp(0, 999_999_999) as u32)
}

#[cfg(not(unix))]
fn process_cpu_time() -> Duration {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed()
}

/// Manually advanced clock for testing
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<Duration>,
}

impl FixedClock {
    /// Clock stopped at `now`
    pub fn new(now: Duration) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Move the clock to `now`
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl CpuClock for FixedClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Measured duration of the timed region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElapsedTime {
    seconds: f64,
}

impl ElapsedTime {
    /// Elapsed time of `seconds`
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Elapsed seconds
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Whole microseconds, truncated
    pub fn micros(&self) -> u64 {
        (self.seconds * 1_000_000.0) as u64
    }
}

/// Brackets a region of work.
///
/// A disabled stopwatch never reads the clock and reports zero.
pub struct Stopwatch<'a, C: CpuClock + ?Sized> {
    clock: &'a C,
    start: Option<Duration>,
}

impl<'a, C: CpuClock + ?Sized> Stopwatch<'a, C> {
    /// Start timing if `enabled`
    pub fn start(clock: &'a C, enabled: bool) -> Self {
        let start = enabled.then(|| clock.now());
        Self { clock, start }
    }

    /// Whether the clock was read at start
    pub fn is_enabled(&self) -> bool {
        self.start.is_some()
    }

    /// Stop timing and return the elapsed time
    pub fn stop(self) -> ElapsedTime {
        match self.start {
            Some(start) => {
                let elapsed = self.clock.now().saturating_sub(start);
                ElapsedTime::from_seconds(elapsed.as_secs_f64())
            }
            None => ElapsedTime::default(),
        }
    }
}
