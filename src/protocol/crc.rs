//! MSB-first CRC-8 over a right-aligned message of up to 32 bits.

use super::{CRC_POLY, CRC_SEED};

/// Computes the CRC-8 of the low `bit_length` bits of `message`.
///
/// The message is aligned to bit 31 of a seeded 32-bit register and shifted
/// out one bit at a time; the checksum is what is left in the top byte.
/// Running it over a 20-bit field yields the byte a producer appends, and
/// running it over the resulting 28 bits yields [`super::CRC_RESIDUE`].
pub fn checksum(message: u32, bit_length: u32) -> u8 {
    let shift = 32u32.saturating_sub(bit_length);
    let mut crc = CRC_SEED ^ message.checked_shl(shift).unwrap_or(0);

    for _ in 0..bit_length {
        if crc & (1 << 31) != 0 {
            crc ^= CRC_POLY << 23;
        }
        crc <<= 1;
    }

    (crc >> 24) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CRC_RESIDUE, PAYLOAD_BITS};

    #[test]
    fn test_residue_of_valid_payloads() {
        // Low 28 bits of the published vectors
        for payload in [0x003_094d, 0x00f_0a6c, 0x212_1ca0, 0xf4c_c8ed] {
            assert_eq!(checksum(payload, PAYLOAD_BITS), CRC_RESIDUE);
        }
    }

    #[test]
    fn test_append_then_residue() {
        // Bulletin C 49: June 2015, +1, dTAI 35
        let fields = (0x20b << 9) | (2 << 7) | 35;
        let crc = checksum(fields, 20);
        assert_eq!(crc, 0xff);
        let payload = (fields << 8) | crc as u32;
        assert_eq!(checksum(payload, PAYLOAD_BITS), CRC_RESIDUE);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(checksum(0x0123_4567, 28), checksum(0x0123_4567, 28));
    }

    #[test]
    fn test_detects_short_bursts() {
        let payload = 0x003_094d;
        for bit in 0..PAYLOAD_BITS {
            for width in 1..=3u32 {
                if bit + width > PAYLOAD_BITS {
                    continue;
                }
                let burst = ((1u32 << width) - 1) << bit;
                assert_ne!(
                    checksum(payload ^ burst, PAYLOAD_BITS),
                    CRC_RESIDUE,
                    "burst of {} at bit {} went undetected",
                    width,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(checksum(0xffff_ffff, 0), (CRC_SEED >> 24) as u8);
        let _ = checksum(0xffff_ffff, 32);
        let _ = checksum(0xffff_ffff, 40);
    }
}
