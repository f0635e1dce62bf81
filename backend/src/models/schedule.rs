//! Operating schedules for SLA deadline computation.
//!
//! A [`Schedule`] decides which hours of the week count toward an elapsed
//! duration. Presets are addressed by the short ids the panel has always
//! used (`247`, `weekday24`, `biz_9_17`, `biz_8_18`); any
//! `biz_<start>_<end>` id describes a custom business window.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised while building or parsing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("business window must satisfy 0 <= start < end <= 24 (got {start_hour}-{end_hour})")]
    InvalidWindow { start_hour: u8, end_hour: u8 },

    #[error("unknown schedule '{0}'")]
    UnknownPreset(String),
}

/// Daily working window applied Monday through Friday.
///
/// The interval is half-open: `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct BusinessWindow {
    start_hour: u8,
    end_hour: u8,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start_hour: u8,
    end_hour: u8,
}

impl TryFrom<RawWindow> for BusinessWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        BusinessWindow::new(raw.start_hour, raw.end_hour)
    }
}

impl From<BusinessWindow> for RawWindow {
    fn from(window: BusinessWindow) -> Self {
        RawWindow {
            start_hour: window.start_hour,
            end_hour: window.end_hour,
        }
    }
}

impl BusinessWindow {
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self, ScheduleError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ScheduleError::InvalidWindow {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Length of one day's window in hours.
    pub fn hours_per_day(&self) -> u8 {
        self.end_hour - self.start_hour
    }
}

/// Which hours of the week count toward an SLA duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// Every hour of every day.
    AlwaysOn,
    /// Every hour of Monday to Friday.
    WeekdaysFull,
    /// Only the window hours of Monday to Friday.
    BusinessWindow(BusinessWindow),
}

/// A named schedule offered in the estimator's picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedulePreset {
    pub id: &'static str,
    pub label: &'static str,
    pub schedule: Schedule,
}

/// Presets in picker order.
pub const SCHEDULE_PRESETS: [SchedulePreset; 4] = [
    SchedulePreset {
        id: "247",
        label: "24/7",
        schedule: Schedule::AlwaysOn,
    },
    SchedulePreset {
        id: "weekday24",
        label: "Weekdays Only (24h, Mon-Fri)",
        schedule: Schedule::WeekdaysFull,
    },
    SchedulePreset {
        id: "biz_9_17",
        label: "Business Hours (9 AM - 5 PM, Mon-Fri)",
        schedule: Schedule::BusinessWindow(BusinessWindow {
            start_hour: 9,
            end_hour: 17,
        }),
    },
    SchedulePreset {
        id: "biz_8_18",
        label: "Extended Business (8 AM - 6 PM, Mon-Fri)",
        schedule: Schedule::BusinessWindow(BusinessWindow {
            start_hour: 8,
            end_hour: 18,
        }),
    },
];

impl Schedule {
    /// Standard 9-5 business hours.
    pub const BUSINESS_HOURS: Schedule = Schedule::BusinessWindow(BusinessWindow {
        start_hour: 9,
        end_hour: 17,
    });

    /// Custom business window, validated.
    pub fn business_window(start_hour: u8, end_hour: u8) -> Result<Self, ScheduleError> {
        BusinessWindow::new(start_hour, end_hour).map(Schedule::BusinessWindow)
    }

    /// Short id usable with [`FromStr`].
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::AlwaysOn => write!(f, "247"),
            Schedule::WeekdaysFull => write!(f, "weekday24"),
            Schedule::BusinessWindow(w) => write!(f, "biz_{}_{}", w.start_hour, w.end_hour),
        }
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        match id.as_str() {
            "247" | "24/7" | "always_on" => return Ok(Schedule::AlwaysOn),
            "weekday24" | "weekdays_full" => return Ok(Schedule::WeekdaysFull),
            _ => {}
        }

        let unknown = || ScheduleError::UnknownPreset(s.to_string());
        let rest = id.strip_prefix("biz_").ok_or_else(unknown)?;
        let (start, end) = rest.split_once('_').ok_or_else(unknown)?;
        let start: u8 = start.parse().map_err(|_| unknown())?;
        let end: u8 = end.parse().map_err(|_| unknown())?;
        Schedule::business_window(start, end)
    }
}
