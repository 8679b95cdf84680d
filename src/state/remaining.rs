//! Remaining time decomposition for display

use std::fmt;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// Hours, minutes and seconds left on a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingTime {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RemainingTime {
    /// All zero, shown once a countdown has finished
    pub fn zero() -> Self {
        Self::default()
    }

    /// Split a millisecond delta, truncating each unit. Negative deltas are zero.
    pub fn from_millis(remaining: i64) -> Self {
        let remaining = remaining.max(0);
        Self {
            hours: remaining / MILLIS_PER_HOUR,
            minutes: (remaining % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            seconds: (remaining % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposition() {
        let time = RemainingTime::from_millis(3_725_000);
        assert_eq!(time, RemainingTime { hours: 1, minutes: 2, seconds: 5 });
    }

    #[test]
    fn test_sub_second_remainders_truncate() {
        assert_eq!(
            RemainingTime::from_millis(59_999),
            RemainingTime { hours: 0, minutes: 0, seconds: 59 }
        );
        assert!(RemainingTime::from_millis(999).is_zero());
    }

    #[test]
    fn test_negative_is_zero() {
        assert!(RemainingTime::from_millis(-5_000).is_zero());
    }

    #[test]
    fn test_display_pads_each_unit() {
        assert_eq!(RemainingTime::from_millis(3_725_000).to_string(), "01:02:05");
        // 37.5 hours
        assert_eq!(RemainingTime::from_millis(135_000_000).to_string(), "37:30:00");
        assert_eq!(RemainingTime::zero().to_string(), "00:00:00");
    }
}
