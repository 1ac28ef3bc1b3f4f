//! Leap-second announcements over DNS
//!
//! The current TAI-UTC offset and the next scheduled leap second are
//! published as a class-E IPv4 address. This library decodes and verifies
//! that address, looks it up, and relates the announced horizon to
//! calendar dates.
//!
//! ```
//! use leapsec_dns::{decode, Delta};
//!
//! let ann = decode(0xf003_094d).unwrap();
//! assert_eq!((ann.year, ann.month, ann.dtai), (1971, 12, 9));
//! assert_eq!(ann.delta, Delta::Increment);
//! ```
pub mod core;

pub mod network;
pub mod protocol;
pub mod time;

// Re-export commonly used items
pub use self::core::{Announcement, Config, DecodeError, Delta, Error, Result};
pub use self::protocol::{checksum, decode, decode_address, encode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
