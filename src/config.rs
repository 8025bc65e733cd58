//! Construction-time configuration, read from the environment.
//!
//! CLI/config-file loading is out of scope for this crate (the spec treats
//! it as an external collaborator's concern); what remains is the handful
//! of environment overrides the spec itself names.

use std::time::Duration;

use tracing::warn;

const FAILED_RESERVATION_TIMEOUT_VAR: &str = "COCKROACH_FAILED_RESERVATION_TIMEOUT";
const DECLINED_RESERVATION_TIMEOUT_VAR: &str = "COCKROACH_DECLINED_RESERVATION_TIMEOUT";

const DEFAULT_TIME_UNTIL_STORE_DEAD: Duration = Duration::from_secs(5 * 60);
const DEFAULT_DECLINED_RESERVATIONS_TIMEOUT: Duration = Duration::from_secs(0);
const DEFAULT_FAILED_RESERVATIONS_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_MAX_FRACTION_USED_THRESHOLD: f64 = 0.95;

/// A 24h `time_until_store_dead` disables aging entirely for tests that
/// want a pool without a ticking liveness clock.
pub const AGING_DISABLED: Duration = Duration::from_secs(24 * 60 * 60);

/// Construction-time knobs for a [`crate::pool::StorePool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// How long a store may go unheard-from before the liveness worker
    /// marks it dead.
    pub time_until_store_dead: Duration,
    /// How long a store is excluded from `Available` classification after
    /// declining a replica placement.
    pub declined_reservations_timeout: Duration,
    /// How long a store is excluded from `Available` classification after
    /// failing a replica placement.
    pub failed_reservations_timeout: Duration,
    /// Fraction-used ceiling below which a store's range count counts
    /// toward a snapshot's `candidate_count` statistic.
    pub max_fraction_used_threshold: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            time_until_store_dead: DEFAULT_TIME_UNTIL_STORE_DEAD,
            declined_reservations_timeout: DEFAULT_DECLINED_RESERVATIONS_TIMEOUT,
            failed_reservations_timeout: DEFAULT_FAILED_RESERVATIONS_TIMEOUT,
            max_fraction_used_threshold: DEFAULT_MAX_FRACTION_USED_THRESHOLD,
        }
    }
}

impl PoolConfig {
    /// Defaults overridden by `COCKROACH_FAILED_RESERVATION_TIMEOUT` and
    /// `COCKROACH_DECLINED_RESERVATION_TIMEOUT`, each a whole number of
    /// seconds. A malformed value is logged and ignored rather than
    /// rejected, consistent with the pool's policy of always producing a
    /// well-defined answer.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(timeout) = read_seconds_env(FAILED_RESERVATION_TIMEOUT_VAR) {
            config.failed_reservations_timeout = timeout;
        }
        if let Some(timeout) = read_seconds_env(DECLINED_RESERVATION_TIMEOUT_VAR) {
            config.declined_reservations_timeout = timeout;
        }
        config
    }

    /// A config with aging disabled, useful for tests exercising
    /// throttle/constraint behavior without a background liveness sweep.
    pub fn aging_disabled() -> Self {
        Self {
            time_until_store_dead: AGING_DISABLED,
            ..Self::default()
        }
    }
}

fn read_seconds_env(var: &str) -> Option<Duration> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!(var, value = %raw, "ignoring malformed timeout override, using default");
                None
            }
        },
        Err(_) => None,
    }
}
