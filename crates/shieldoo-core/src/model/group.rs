// ── Group reference ──
//
// A group is referenced by exactly one of its identifiers. On the wire the
// API still expects all three keys, so the unused ones go out empty.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ParseError;

/// Reference to a group by id, name, or directory object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Group {
    Id(String),
    Name(String),
    ObjectId(String),
}

impl Group {
    /// The selector key as written in flags (`id`, `name`, `objectId`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::ObjectId(_) => "objectId",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Id(v) | Self::Name(v) | Self::ObjectId(v) => v,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value())
    }
}

/// Parses `key=value` with key one of `id`, `name`, `objectId` (the last
/// one case-insensitively). Exactly one `=` and a non-empty value.
impl FromStr for Group {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidGroup(s.to_owned());

        let mut parts = s.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        if value.is_empty() {
            return Err(invalid());
        }

        match key {
            "id" => Ok(Self::Id(value.to_owned())),
            "name" => Ok(Self::Name(value.to_owned())),
            k if k.eq_ignore_ascii_case("objectid") => Ok(Self::ObjectId(value.to_owned())),
            _ => Err(invalid()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupWire<'a> {
    id: &'a str,
    name: &'a str,
    object_id: &'a str,
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut wire = GroupWire {
            id: "",
            name: "",
            object_id: "",
        };
        match self {
            Self::Id(v) => wire.id = v,
            Self::Name(v) => wire.name = v,
            Self::ObjectId(v) => wire.object_id = v,
        }
        wire.serialize(serializer)
    }
}
