//! Periodic autosave schedule.
//!
//! The host drives time: it calls [`crate::api::NotepadApi::tick`] from whatever timer it
//! has, and the timer decides whether a full save is due. Edit-triggered saves are
//! independent of this schedule; both overwrite the same key with the whole state, so
//! the last write wins.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    interval: Duration,
    last: DateTime<Utc>,
}

impl AutosaveTimer {
    pub fn new(interval_secs: u64, started: DateTime<Utc>) -> Self {
        let secs = i64::try_from(interval_secs.max(1)).unwrap_or(i64::MAX);
        Self {
            interval: Duration::try_seconds(secs).unwrap_or(Duration::MAX),
            last: started,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True once a full interval has passed since the last firing. Firing restarts the
    /// interval from `now`.
    pub fn fire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        if now.signed_duration_since(self.last) < self.interval {
            return false;
        }
        self.last = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn fires_every_interval() {
        let mut timer = AutosaveTimer::new(30, at(0));
        assert!(!timer.fire_if_due(at(10)));
        assert!(!timer.fire_if_due(at(29)));
        assert!(timer.fire_if_due(at(30)));
        assert!(!timer.fire_if_due(at(45)));
        assert!(timer.fire_if_due(at(61)));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let timer = AutosaveTimer::new(0, at(0));
        assert_eq!(timer.interval(), Duration::seconds(1));
    }
}
