//! Reference vector and property tests for the announcement decoder.

use leapsec_dns::protocol::{
    checksum, decode, encode, parse_address, CRC_RESIDUE, FIELD_BITS, PAYLOAD_BITS, SENTINEL,
};
use leapsec_dns::{Announcement, DecodeError, Delta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Expected decoding of a published address.
struct Vector {
    address: &'static str,
    expected: Result<(i32, u32, u32, i32), DecodeError>,
}

const VECTORS: &[Vector] = &[
    Vector {
        address: "240.3.9.77",
        expected: Ok((1971, 12, 9, 1)),
    },
    Vector {
        address: "240.15.10.108",
        expected: Ok((1972, 6, 10, 1)),
    },
    Vector {
        address: "242.18.28.160",
        expected: Ok((1993, 12, 28, 0)),
    },
    Vector {
        address: "255.76.200.237",
        expected: Ok((2135, 1, 72, -1)),
    },
    Vector {
        address: "127.240.133.76",
        expected: Err(DecodeError::BadFormat),
    },
    Vector {
        address: "255.209.76.40",
        expected: Err(DecodeError::IntegrityFailure),
    },
    Vector {
        address: "241.179.152.73",
        expected: Err(DecodeError::IllegalDelta),
    },
];

fn random_announcement(rng: &mut StdRng) -> Announcement {
    // Field values 0..2048 cover November 1971 through June 2142
    let index = rng.gen_range(10..2058);
    let delta = match rng.gen_range(0..3) {
        0 => Delta::Unchanged,
        1 => Delta::Decrement,
        _ => Delta::Increment,
    };
    Announcement::new(1971 + index / 12, 1 + (index % 12) as u32, rng.gen_range(0..128), delta)
}

#[test]
fn test_published_vectors() {
    for v in VECTORS {
        let raw = parse_address(v.address).unwrap();
        let result = decode(raw).map(|a| (a.year, a.month, a.dtai, a.delta.seconds()));
        assert_eq!(result, v.expected, "vector {}", v.address);
    }
}

#[test]
fn test_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x1ea9_5ec0);
    for _ in 0..10_000 {
        let ann = random_announcement(&mut rng);
        let raw = encode(&ann).unwrap();
        assert_eq!(raw >> PAYLOAD_BITS, SENTINEL);
        assert_eq!(checksum(raw & 0x0fff_ffff, PAYLOAD_BITS), CRC_RESIDUE);
        assert_eq!(decode(raw), Ok(ann));
    }
}

#[test]
fn test_single_bit_errors_detected() {
    let mut rng = StdRng::seed_from_u64(49);
    for _ in 0..500 {
        let raw = encode(&random_announcement(&mut rng)).unwrap();
        for bit in 0..PAYLOAD_BITS {
            assert_eq!(
                decode(raw ^ (1 << bit)),
                Err(DecodeError::IntegrityFailure),
                "flip of bit {} in {:#010x}",
                bit,
                raw
            );
        }
    }
}

#[test]
fn test_double_bit_errors_detected() {
    let raw = parse_address("244.23.35.255").unwrap();
    for a in 0..PAYLOAD_BITS {
        for b in (a + 1)..PAYLOAD_BITS {
            assert_eq!(
                decode(raw ^ (1 << a) ^ (1 << b)),
                Err(DecodeError::IntegrityFailure)
            );
        }
    }
}

#[test]
fn test_sentinel_enforced() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let nibble: u32 = rng.gen_range(0..15);
        let raw = (nibble << PAYLOAD_BITS) | (rng.gen::<u32>() & 0x0fff_ffff);
        assert_eq!(decode(raw), Err(DecodeError::BadFormat));
    }

    // A valid payload does not rescue a wrong nibble
    let valid = encode(&Announcement::new(2016, 12, 36, Delta::Increment)).unwrap();
    for nibble in 0..15u32 {
        let raw = (valid & 0x0fff_ffff) | (nibble << PAYLOAD_BITS);
        assert_eq!(decode(raw), Err(DecodeError::BadFormat));
    }
}

#[test]
fn test_illegal_delta_enforced() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..1_000 {
        let months: u32 = rng.gen_range(0..2048);
        let dtai: u32 = rng.gen_range(0..128);
        let fields = (months << 9) | (3 << 7) | dtai;
        let payload = (fields << 8) | checksum(fields, FIELD_BITS) as u32;
        let raw = (SENTINEL << PAYLOAD_BITS) | payload;
        assert_eq!(decode(raw), Err(DecodeError::IllegalDelta));
    }
}

#[test]
fn test_random_words_never_misdecode() {
    // Whatever decodes must re-encode to the same word
    let mut rng = StdRng::seed_from_u64(2015);
    for _ in 0..100_000 {
        let raw = 0xf000_0000 | (rng.gen::<u32>() & 0x0fff_ffff);
        if let Ok(ann) = decode(raw) {
            assert_eq!(encode(&ann).unwrap(), raw);
        }
    }
}
