//! Calendar interpretation of announcements
//!
//! An announcement guarantees its dTAI until the end of the horizon month.
//! These helpers turn the horizon into concrete UTC dates and instants; they
//! never touch a clock.
//!
//! # Examples
//!
//! ```
//! use leapsec_dns::protocol::decode_address;
//! use leapsec_dns::time;
//!
//! let ann = decode_address("244.23.35.255").unwrap();
//! let expiry = time::expires_at(&ann).unwrap();
//! assert_eq!(expiry.to_rfc3339(), "2015-07-01T00:00:00+00:00");
//! ```

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::core::Announcement;

/// First day of the horizon month
pub fn horizon_start(announcement: &Announcement) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(announcement.year, announcement.month, 1)
}

/// Instant at which the announced dTAI stops being guaranteed: midnight UTC
/// at the start of the month after the horizon.
pub fn expires_at(announcement: &Announcement) -> Option<DateTime<Utc>> {
    let (year, month) = if announcement.month >= 12 {
        (announcement.year.checked_add(1)?, 1)
    } else {
        (announcement.year, announcement.month + 1)
    };

    let start = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&start))
}

/// Returns whether `instant` falls before the end of the horizon month
pub fn covers(announcement: &Announcement, instant: DateTime<Utc>) -> bool {
    expires_at(announcement)
        .map(|expiry| instant < expiry)
        .unwrap_or(false)
}

/// dTAI in effect at `instant`, if the announcement says anything about it.
///
/// Before expiry that is the announced dTAI. After it only the first month is
/// known, since a later announcement may add another step.
pub fn dtai_at(announcement: &Announcement, instant: DateTime<Utc>) -> Option<i64> {
    let expiry = expires_at(announcement)?;
    if instant < expiry {
        return Some(i64::from(announcement.dtai));
    }

    let following = Announcement {
        year: expiry.year(),
        month: expiry.month(),
        ..*announcement
    };
    if instant < expires_at(&following)? {
        Some(announcement.dtai_after())
    } else {
        None
    }
}
