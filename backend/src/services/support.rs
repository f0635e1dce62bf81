//! Customer-support helpers: response time between two timestamps, delivery
//! ETAs and the canned-reply randomiser.

use std::str::FromStr;

use chrono::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::time::{duration_to_hours, parse_instant, Instant, TimeParseError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SupportError {
    #[error(transparent)]
    InvalidTime(#[from] TimeParseError),

    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: Instant, end: Instant },

    #[error("invalid duration {0} (expected a finite, non-negative total)")]
    InvalidDuration(f64),
}

/// Elapsed time split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponseTime {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_minutes: f64,
    pub total_hours: f64,
}

/// Time from `start` to `end`. `end` must not precede `start`.
pub fn response_time(start: Instant, end: Instant) -> Result<ResponseTime, SupportError> {
    let elapsed = end - start;
    if elapsed < Duration::zero() {
        return Err(SupportError::EndBeforeStart { start, end });
    }
    let total_hours = duration_to_hours(elapsed);
    Ok(ResponseTime {
        hours: elapsed.num_hours(),
        minutes: elapsed.num_minutes() % 60,
        seconds: elapsed.num_seconds() % 60,
        total_minutes: qtty::Hours::new(total_hours).to::<qtty::Minute>().value(),
        total_hours,
    })
}

/// [`response_time`] on form strings.
pub fn response_time_str(start: &str, end: &str) -> Result<ResponseTime, SupportError> {
    response_time(parse_instant(start)?, parse_instant(end)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaUnit {
    Hours,
    Days,
    Weeks,
}

impl EtaUnit {
    fn to_duration(self, amount: f64) -> Option<Duration> {
        let seconds = match self {
            EtaUnit::Hours => qtty::Hours::new(amount).to::<qtty::Second>(),
            EtaUnit::Days => qtty::Days::new(amount).to::<qtty::Second>(),
            EtaUnit::Weeks => qtty::Weeks::new(amount).to::<qtty::Second>(),
        };
        let millis = (seconds.value() * 1_000.0).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return None;
        }
        Duration::try_milliseconds(millis as i64)
    }
}

impl FromStr for EtaUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hours" | "hour" | "h" => Ok(EtaUnit::Hours),
            "days" | "day" | "d" => Ok(EtaUnit::Days),
            "weeks" | "week" | "w" => Ok(EtaUnit::Weeks),
            _ => Err(format!("Unknown ETA unit: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Eta {
    pub eta: Instant,
    /// `base + delay`, in the request's unit.
    pub total: f64,
    pub unit: EtaUnit,
}

/// Arrival estimate: `start + (base + delay)` in `unit`.
///
/// Negative delays are allowed as long as the total stays non-negative.
pub fn eta(start: Instant, base: f64, delay: f64, unit: EtaUnit) -> Result<Eta, SupportError> {
    let total = base + delay;
    if !total.is_finite() || total < 0.0 {
        return Err(SupportError::InvalidDuration(total));
    }
    let eta = unit
        .to_duration(total)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or(SupportError::InvalidDuration(total))?;
    Ok(Eta { eta, total, unit })
}

// =========================================================
// Snippets
// =========================================================

pub const DEFAULT_SNIPPETS: [&str; 5] = [
    "Thank you for reaching out! I'd be happy to help you with that.",
    "I understand your concern and will look into this right away.",
    "I've checked on this for you, and here's what I found:",
    "Thanks for your patience while we resolved this issue.",
    "Is there anything else I can help you with today?",
];

/// An editable list of canned replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDeck {
    snippets: Vec<String>,
}

impl Default for SnippetDeck {
    fn default() -> Self {
        Self::new(DEFAULT_SNIPPETS)
    }
}

impl SnippetDeck {
    /// Deck with the given snippets. Blank entries are dropped.
    pub fn new<I, S>(snippets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut deck = Self {
            snippets: Vec::new(),
        };
        for snippet in snippets {
            deck.add(snippet.as_ref());
        }
        deck
    }

    pub fn snippets(&self) -> &[String] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Append `text` trimmed. Returns `false` if it was blank.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.snippets.push(text.to_string());
        true
    }

    /// Remove the snippet at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.snippets.len()).then(|| self.snippets.remove(index))
    }

    /// Uniformly random snippet drawn with `rng`.
    pub fn pick_with<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        if self.snippets.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.snippets.len());
        Some(self.snippets[index].as_str())
    }

    pub fn pick(&self) -> Option<&str> {
        self.pick_with(&mut rand::thread_rng())
    }
}
