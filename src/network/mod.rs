//! DNS retrieval of announcements
//!
//! The announcement is published as the A record of a well-known name. A
//! resolver may hand back several addresses; each is tried in order until
//! one decodes.

mod lookup;

pub use self::lookup::{select, AnnouncementResolver, Lookup};
