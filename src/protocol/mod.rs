//! Announcement wire format
//!
//! The announcement is a class-E IPv4 address, MSB first:
//!
//! ```text
//!  31   28 27            17 16 15 14        8 7        0
//! +-------+----------------+-----+-----------+----------+
//! | 1111  |     month      |  d  |   dTAI    |  CRC-8   |
//! +-------+----------------+-----+-----------+----------+
//! ```
//!
//! `month + 10` counts months since January 1971, `d` is the action taken
//! on dTAI when that month ends, and the CRC covers bits 27-0.

pub mod announcement;
pub mod crc;

pub use self::announcement::{
    decode, decode_address, encode, from_octets, parse_address, TestVector, TEST_VECTORS,
};
pub use self::crc::checksum;

/// Top nibble every announcement carries
pub const SENTINEL: u32 = 0xf;

/// CRC-8 register seed
pub const CRC_SEED: u32 = 0x54a9_abf8;

/// CRC-8 generator, x^8 + x^5 + x^3 + x^2 + x + 1
pub const CRC_POLY: u32 = 0x12f;

/// Checksum of a correctly protected 28-bit payload
pub const CRC_RESIDUE: u8 = 0x80;

/// Added to the month field to get months since January 1971
pub const MONTH_BASE: u32 = 10;

/// First year of the month count
pub const EPOCH_YEAR: i32 = 1971;

/// Bits below the sentinel
pub const PAYLOAD_BITS: u32 = 28;

/// Month, delta and dTAI fields together
pub const FIELD_BITS: u32 = 20;

/// Width of the month field
pub const MONTH_BITS: u32 = 11;

/// Width of the delta field
pub const DELTA_BITS: u32 = 2;

/// Width of the dTAI field
pub const DTAI_BITS: u32 = 7;

/// Name the announcement is published under
pub const DEFAULT_FQDN: &str = "leapsecond.utcd.org";
