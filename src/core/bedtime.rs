use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BedtimeError {
    #[error("invalid bedtime {0:?}, expected HH:MM")]
    Format(String),
    #[error("bedtime {hour}:{minute:02} is out of range")]
    OutOfRange { hour: u32, minute: u32 },
    #[error("bedtime {time} does not exist on {date} in the local time zone")]
    Nonexistent { date: NaiveDate, time: NaiveTime },
}

/// A daily local time-of-day cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bedtime {
    time: NaiveTime,
}

impl Bedtime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, BedtimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| Self { time })
            .ok_or(BedtimeError::OutOfRange { hour, minute })
    }

    /// The concrete bedtime instant on `date` in `tz`. An ambiguous local time resolves to the earlier instant.
    pub fn on<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Result<DateTime<Tz>, BedtimeError> {
        tz.from_local_datetime(&date.and_time(self.time))
            .earliest()
            .ok_or(BedtimeError::Nonexistent { date, time: self.time })
    }
}

impl FromStr for Bedtime {
    type Err = BedtimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || BedtimeError::Format(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(format_err)?;
        let hour: u32 = hour.trim().parse().map_err(|_| format_err())?;
        let minute: u32 = minute.trim().parse().map_err(|_| format_err())?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for Bedtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format("%H:%M"))
    }
}
