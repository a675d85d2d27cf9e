// ── Typed entity identifiers ──
//
// Transparent UUID newtypes, one per entity. The two selection sets
// (gallery venues vs. proposal-tab associations) and the weak
// active-project pointer all carry ids of different entities; distinct
// types keep them from being mixed up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(u: Uuid) -> Self {
                Self(u)
            }
        }
    };
}

id_type!(
    /// Identifier of a sourcing project.
    ProjectId
);
id_type!(
    /// Identifier of a venue.
    VenueId
);
id_type!(
    /// Identifier of a project-venue association record.
    LinkId
);
id_type!(
    /// Identifier of a client (customer account).
    ClientId
);
id_type!(
    /// Identifier of a venue photo.
    PhotoId
);
id_type!(
    /// Identifier of a user account.
    UserId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_from_str() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        let id: ProjectId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn rejects_non_uuid_strings() {
        assert!("not-a-uuid".parse::<VenueId>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let id: VenueId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }
}
