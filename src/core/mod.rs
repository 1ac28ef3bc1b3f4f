//! Core types shared by the decoder, the resolver and the CLI
//!
//! This module contains the error taxonomy, the decoded announcement value
//! and the lookup configuration.

pub mod error;
pub mod types;
pub mod serde;

pub use self::error::{DecodeError, Error, Result};
pub use self::types::{Announcement, Config, Delta};
