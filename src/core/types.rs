use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{DecodeError, Error, Result};

/// What happens to DTAI at the end of the horizon month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delta {
    /// DTAI stays as is
    Unchanged,
    /// Negative leap second, DTAI decreases by one
    Decrement,
    /// Positive leap second, DTAI increases by one
    Increment,
}

impl Delta {
    /// Maps the 2-bit wire code onto a delta. Code 3 is reserved.
    pub fn from_code(code: u8) -> std::result::Result<Self, DecodeError> {
        match code {
            0 => Ok(Delta::Unchanged),
            1 => Ok(Delta::Decrement),
            2 => Ok(Delta::Increment),
            _ => Err(DecodeError::IllegalDelta),
        }
    }

    /// Returns the 2-bit wire code
    pub fn code(&self) -> u8 {
        match self {
            Delta::Unchanged => 0,
            Delta::Decrement => 1,
            Delta::Increment => 2,
        }
    }

    /// Returns the adjustment in seconds
    pub fn seconds(&self) -> i32 {
        match self {
            Delta::Unchanged => 0,
            Delta::Decrement => -1,
            Delta::Increment => 1,
        }
    }

    /// Derives the delta from DTAI before and after the month boundary.
    /// Anything other than a one second step is treated as no change.
    pub fn from_transition(before: u32, after: u32) -> Self {
        if before.checked_add(1) == Some(after) {
            Delta::Increment
        } else if before.checked_sub(1) == Some(after) {
            Delta::Decrement
        } else {
            Delta::Unchanged
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.seconds())
    }
}

/// A decoded leap-second announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Announcement {
    /// Year of the horizon month
    pub year: i32,
    /// Horizon month, 1-12
    pub month: u32,
    /// Seconds UTC trails TAI until the horizon month ends
    pub dtai: u32,
    /// Adjustment applied to `dtai` at the end of the horizon month
    pub delta: Delta,
}

impl Announcement {
    /// Creates a new announcement
    pub const fn new(year: i32, month: u32, dtai: u32, delta: Delta) -> Self {
        Announcement {
            year,
            month,
            dtai,
            delta,
        }
    }

    /// DTAI once the horizon month has ended
    pub fn dtai_after(&self) -> i64 {
        i64::from(self.dtai) + i64::from(self.delta.seconds())
    }

    /// Zero-based months since January 1971.
    ///
    /// `None` for months before the epoch, a month outside 1-12, or an index
    /// that does not fit in `u32`.
    pub fn month_index(&self) -> Option<u32> {
        if !(1..=12).contains(&self.month) {
            return None;
        }

        let years = self.year.checked_sub(crate::protocol::EPOCH_YEAR)?;
        u32::try_from(years)
            .ok()?
            .checked_mul(12)?
            .checked_add(self.month - 1)
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Year: {:4}  Month {:2}  dTAI: {:3}  Delta: {:2}",
            self.year,
            self.month,
            self.dtai,
            self.delta.seconds()
        )
    }
}

/// Configuration for announcement lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name whose A records carry the announcement
    pub fqdn: String,
    /// Per-query timeout
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub timeout: Duration,
    /// Number of attempts per query
    pub attempts: usize,
    /// Use the system resolver configuration instead of the library defaults
    pub use_system_conf: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fqdn: crate::protocol::DEFAULT_FQDN.to_string(),
            timeout: Duration::from_secs(5),
            attempts: 2,
            use_system_conf: true,
        }
    }
}

impl Config {
    /// Parses a TOML document, filling missing keys from the defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)
            .map_err(|e| Error::config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.fqdn.trim().is_empty() {
            return Err(Error::config("FQDN must not be empty"));
        }

        if self.attempts == 0 {
            return Err(Error::config("At least one attempt is required"));
        }

        if self.timeout < Duration::from_millis(100) {
            return Err(Error::config("Timeout too small"));
        }

        Ok(())
    }
}
