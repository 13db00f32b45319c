//! Layer 1: Identity atoms
//!
//! UserId, BlogId, CommentId: UUID-backed row identifiers as issued by the
//! backend. Only the backend mints new ones; the client parses and carries
//! them.
//!
//! Slug: URL locator for a published blog, lowercase alphanumeric with
//! hyphens.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{CoreError, InvalidId, InvalidSlug};

macro_rules! uuid_id {
    ($name:ident, $variant:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn parse_str(s: &str) -> Result<Self, CoreError> {
                parse_uuid_id(s, |raw, reason| InvalidId::$variant { raw, reason }).map(Self)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

uuid_id!(UserId, User);
uuid_id!(BlogId, Blog);
uuid_id!(CommentId, Comment);

fn parse_uuid_id<F>(raw: &str, invalid: F) -> Result<Uuid, CoreError>
where
    F: FnOnce(String, String) -> InvalidId,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(raw.to_string(), "empty".into()).into());
    }
    Uuid::parse_str(trimmed).map_err(|err| invalid(raw.to_string(), err.to_string()).into())
}

/// URL slug - non-empty, lowercase alphanumeric and hyphens, no leading or
/// trailing hyphen.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.is_empty() {
            return Err(InvalidSlug {
                raw: s.to_string(),
                reason: "empty".into(),
            }
            .into());
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(InvalidSlug {
                raw: s.to_string(),
                reason: "leading or trailing hyphen".into(),
            }
            .into());
        }
        for c in s.bytes() {
            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'-') {
                return Err(InvalidSlug {
                    raw: s.to_string(),
                    reason: "contains character outside [a-z0-9-]".into(),
                }
                .into());
            }
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug({:?})", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
