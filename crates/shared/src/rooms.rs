//! Room addressing for the pub/sub layer.
//!
//! Every player owns a `portrait{id}` room (the public display overlay for
//! that player's rolls) and there is one global `admin` room. Rooms travel on
//! the wire as their rendered string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sheetroll_domain::{Audience, DomainError, PlayerId, Requester};

const PORTRAIT_PREFIX: &str = "portrait";
const ADMIN_ROOM: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    /// A player's public display
    Portrait(PlayerId),
    /// The admin console
    Admin,
}

impl Room {
    /// Room carrying events for `audience` on behalf of `requester`.
    ///
    /// The requester audience has no room: it receives its results as the
    /// response to its own roll request.
    pub fn for_audience(audience: Audience, requester: &Requester) -> Option<Self> {
        match audience {
            Audience::Requester => None,
            Audience::Admin => Some(Self::Admin),
            Audience::Public => Some(Self::Portrait(requester.id())),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait(id) => write!(f, "{}{}", PORTRAIT_PREFIX, id),
            Self::Admin => f.write_str(ADMIN_ROOM),
        }
    }
}

impl FromStr for Room {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ADMIN_ROOM {
            return Ok(Self::Admin);
        }

        match s.strip_prefix(PORTRAIT_PREFIX) {
            Some(id) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit() || b == b'-') => {
                Ok(Self::Portrait(id.parse()?))
            }
            _ => Err(DomainError::parse(format!("Unknown room: {}", s))),
        }
    }
}

impl Serialize for Room {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Room {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_room_names() {
        assert_eq!(Room::Portrait(PlayerId::new(12)).to_string(), "portrait12");
        assert_eq!(Room::Admin.to_string(), "admin");
    }

    #[test]
    fn parses_room_names() {
        assert_eq!(
            "portrait7".parse::<Room>().unwrap(),
            Room::Portrait(PlayerId::new(7))
        );
        assert_eq!("admin".parse::<Room>().unwrap(), Room::Admin);
        assert!("portrait".parse::<Room>().is_err());
        assert!("portrait 7".parse::<Room>().is_err());
        assert!("player7".parse::<Room>().is_err());
    }

    #[test]
    fn maps_audiences_to_rooms() {
        let requester = Requester::player(PlayerId::new(4));
        assert_eq!(Room::for_audience(Audience::Requester, &requester), None);
        assert_eq!(
            Room::for_audience(Audience::Admin, &requester),
            Some(Room::Admin)
        );
        assert_eq!(
            Room::for_audience(Audience::Public, &requester),
            Some(Room::Portrait(PlayerId::new(4)))
        );
    }

    #[test]
    fn travels_as_string() {
        let json = serde_json::to_string(&Room::Portrait(PlayerId::new(3))).unwrap();
        assert_eq!(json, r#""portrait3""#);
        let room: Room = serde_json::from_str(r#""admin""#).unwrap();
        assert!(room.is_admin());
    }
}
