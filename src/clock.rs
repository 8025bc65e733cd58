//! Hybrid-logical-clock collaborator.
//!
//! [`StorePool`](crate::pool::StorePool) treats time as two separate
//! domains: an [`HlcTimestamp`] for liveness bookkeeping (the priority key
//! of the liveness queue, and the moment a store was last heard from) and
//! plain [`std::time::Instant`] for throttle deadlines. The two never cross,
//! per the non-goal in the spec that exact clocks are not required so long
//! as their uses don't mix.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// A causally ordered timestamp with a wall-clock projection.
///
/// Two readings taken on the same clock are always comparable and strictly
/// increasing, even if the underlying wall clock does not advance between
/// them (the `logical` component breaks the tie).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HlcTimestamp {
    physical: Duration,
    logical: u32,
}

impl HlcTimestamp {
    /// Constructs a timestamp directly from its components. Exposed for
    /// tests that need to assert on or fabricate specific instants.
    pub fn new(physical: Duration, logical: u32) -> Self {
        Self { physical, logical }
    }

    /// The zero timestamp, earlier than anything a real clock will produce.
    pub const fn zero() -> Self {
        Self {
            physical: Duration::ZERO,
            logical: 0,
        }
    }

    /// Duration elapsed since `earlier`, saturating to zero if `self` is not
    /// actually later (clock skew, or a synthetic test timestamp).
    pub fn saturating_duration_since(&self, earlier: HlcTimestamp) -> Duration {
        self.physical.saturating_sub(earlier.physical)
    }
}

impl std::ops::Add<Duration> for HlcTimestamp {
    type Output = HlcTimestamp;

    fn add(self, rhs: Duration) -> HlcTimestamp {
        HlcTimestamp {
            physical: self.physical + rhs,
            logical: 0,
        }
    }
}

/// The clock collaborator consumed by the store pool.
pub trait Clock: Send + Sync {
    /// Returns a reading that is strictly greater than every prior reading
    /// from this clock.
    fn now(&self) -> HlcTimestamp;
}

/// Default [`Clock`] backed by the system wall clock, with a logical counter
/// that advances when two consecutive readings land on the same physical
/// instant (common at sub-millisecond resolution under contention).
pub struct SystemClock {
    state: Mutex<HlcTimestamp>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HlcTimestamp::zero()),
        }
    }

    fn wall_now() -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> HlcTimestamp {
        let wall = Self::wall_now();
        let mut state = self.state.lock();
        if wall > state.physical {
            *state = HlcTimestamp {
                physical: wall,
                logical: 0,
            };
        } else {
            state.logical += 1;
        }
        *state
    }
}

/// A [`Clock`] that only advances when told to, for tests that need exact
/// control over liveness timing without sleeping on the real wall clock.
pub struct ManualClock {
    current: Mutex<HlcTimestamp>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(HlcTimestamp::zero()),
        }
    }

    /// Moves the clock forward by `delta`, resetting the logical component.
    pub fn advance(&self, delta: Duration) {
        let mut current = self.current.lock();
        *current = *current + delta;
    }

    /// Sets the clock to an explicit timestamp.
    pub fn set(&self, timestamp: HlcTimestamp) {
        *self.current.lock() = timestamp;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> HlcTimestamp {
        let mut current = self.current.lock();
        current.logical += 1;
        *current
    }
}
