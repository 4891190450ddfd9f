use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::str::FromStr;

/// Minutes since midnight. Schedules repeat daily, so valid values are `0..1440`.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
pub struct Time(pub u64);

impl Time {
    pub const MINUTES_PER_DAY: u64 = 24 * 60;
    pub const MINUTES_PER_WEEK: u64 = 7 * Self::MINUTES_PER_DAY;

    pub fn minutes(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        write!(f, "{:02}:{:02}", hours, mins)
    }
}

impl FromStr for Time {
    type Err = String;

    /// Parses `HH:MM` with exactly two digits on each side.
    /// `24:00` is rejected, minute 1440 belongs to the next day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        let (h, m) = s
            .trim()
            .split_once(':')
            .filter(|&(h, m)| two_digits(h) && two_digits(m))
            .ok_or_else(|| format!("expected HH:MM, got '{}'", s.trim()))?;
        let hours = h
            .parse::<u64>()
            .map_err(|_| format!("invalid hour '{}'", h))?;
        let mins = m
            .parse::<u64>()
            .map_err(|_| format!("invalid minute '{}'", m))?;
        if hours >= 24 || mins >= 60 {
            return Err(format!("time of day out of range: '{}'", s.trim()));
        }
        Ok(Time(hours * 60 + mins))
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time(self.0 + rhs)
    }
}
