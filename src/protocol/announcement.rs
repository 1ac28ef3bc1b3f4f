use std::net::Ipv4Addr;

use crate::core::{Announcement, DecodeError, Delta, Error, Result};
use super::crc::checksum;
use super::{
    CRC_RESIDUE, DELTA_BITS, DTAI_BITS, EPOCH_YEAR, FIELD_BITS, MONTH_BASE, MONTH_BITS,
    PAYLOAD_BITS, SENTINEL,
};

/// Decodes a raw 32-bit announcement.
///
/// Checks run in wire order: sentinel, checksum, then the delta field.
/// An input that is wrong in several ways reports the first of these.
pub fn decode(raw: u32) -> std::result::Result<Announcement, DecodeError> {
    if raw >> PAYLOAD_BITS != SENTINEL {
        return Err(DecodeError::BadFormat);
    }

    let payload = raw & ((1 << PAYLOAD_BITS) - 1);

    if checksum(payload, PAYLOAD_BITS) != CRC_RESIDUE {
        return Err(DecodeError::IntegrityFailure);
    }

    let mut fields = payload >> 8;

    let dtai = fields & ((1 << DTAI_BITS) - 1);
    fields >>= DTAI_BITS;

    let code = (fields & ((1 << DELTA_BITS) - 1)) as u8;
    fields >>= DELTA_BITS;

    let months = (fields & ((1 << MONTH_BITS) - 1)) + MONTH_BASE;

    let delta = Delta::from_code(code)?;

    Ok(Announcement {
        year: EPOCH_YEAR + (months / 12) as i32,
        month: 1 + months % 12,
        dtai,
        delta,
    })
}

/// Encodes an announcement into its 32-bit form, checksum included
pub fn encode(announcement: &Announcement) -> Result<u32> {
    if !(1..=12).contains(&announcement.month) {
        return Err(Error::encode(format!(
            "Month {} out of range",
            announcement.month
        )));
    }

    let months = announcement
        .month_index()
        .and_then(|index| index.checked_sub(MONTH_BASE))
        .filter(|months| *months < 1 << MONTH_BITS)
        .ok_or_else(|| {
            Error::encode(format!(
                "{}-{:02} is outside the representable horizon",
                announcement.year, announcement.month
            ))
        })?;

    if announcement.dtai >= 1 << DTAI_BITS {
        return Err(Error::encode(format!(
            "dTAI {} does not fit in {} bits",
            announcement.dtai, DTAI_BITS
        )));
    }

    let mut fields = months;
    fields = (fields << DELTA_BITS) | announcement.delta.code() as u32;
    fields = (fields << DTAI_BITS) | announcement.dtai;

    let payload = (fields << 8) | checksum(fields, FIELD_BITS) as u32;
    debug_assert_eq!(checksum(payload, PAYLOAD_BITS), CRC_RESIDUE);

    Ok((SENTINEL << PAYLOAD_BITS) | payload)
}

/// Combines four address octets, most significant first
pub fn from_octets(octets: [u8; 4]) -> u32 {
    u32::from_be_bytes(octets)
}

/// Parses a dotted-quad address into its 32-bit value
pub fn parse_address(addr: &str) -> Result<u32> {
    let ip: Ipv4Addr = addr
        .trim()
        .parse()
        .map_err(|e| Error::address(format!("Invalid IPv4 address {:?}: {}", addr, e)))?;
    Ok(from_octets(ip.octets()))
}

/// Parses and decodes a dotted-quad announcement
pub fn decode_address(addr: &str) -> Result<Announcement> {
    Ok(decode(parse_address(addr)?)?)
}

/// Reference address with its expected decoding
#[derive(Debug, Clone, Copy)]
pub struct TestVector {
    /// Dotted-quad address
    pub address: &'static str,
    /// Expected outcome
    pub expected: std::result::Result<Announcement, DecodeError>,
}

/// Published reference vectors
pub const TEST_VECTORS: &[TestVector] = &[
    TestVector {
        address: "240.3.9.77",
        expected: Ok(Announcement::new(1971, 12, 9, Delta::Increment)),
    },
    TestVector {
        address: "240.15.10.108",
        expected: Ok(Announcement::new(1972, 6, 10, Delta::Increment)),
    },
    TestVector {
        address: "242.18.28.160",
        expected: Ok(Announcement::new(1993, 12, 28, Delta::Unchanged)),
    },
    TestVector {
        address: "255.76.200.237",
        expected: Ok(Announcement::new(2135, 1, 72, Delta::Decrement)),
    },
    TestVector {
        address: "127.240.133.76",
        expected: Err(DecodeError::BadFormat),
    },
    TestVector {
        address: "255.209.76.40",
        expected: Err(DecodeError::IntegrityFailure),
    },
    TestVector {
        address: "241.179.152.73",
        expected: Err(DecodeError::IllegalDelta),
    },
];
