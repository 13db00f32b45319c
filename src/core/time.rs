//! Layer 0: Time primitives
//!
//! Timestamp is UTC wall milliseconds. It orders comment records
//! chronologically as delivered by the backend; it is not a causality
//! primitive.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Wall clock in UTC milliseconds since the Unix epoch.
///
/// Copy is fine here - it's just a measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// RFC 3339 rendering for display surfaces.
    ///
    /// Falls back to raw milliseconds if the value is outside the
    /// representable calendar range.
    pub fn to_rfc3339(self) -> String {
        OffsetDateTime::from_unix_timestamp_nanos(self.0 as i128 * 1_000_000)
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok())
            .unwrap_or_else(|| format!("{}ms", self.0))
    }
}
