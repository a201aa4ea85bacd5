//! Typed ID wrappers for domain records.

use crate::FitlogError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new time-ordered ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an ID from a string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(
    /// A strongly-typed wrapper for user IDs.
    UserId
);

uuid_id!(
    /// A strongly-typed wrapper for workout IDs.
    WorkoutId
);

uuid_id!(
    /// A strongly-typed wrapper for weight entry IDs.
    WeightId
);

impl UserId {
    /// Parses a path parameter, rejecting it with the message clients expect.
    pub fn parse_param(raw: &str) -> Result<Self, FitlogError> {
        Self::parse(raw).map_err(|_| FitlogError::invalid_argument(format!("Invalid user ID: {raw}")))
    }
}

impl WorkoutId {
    /// Parses a path parameter, rejecting it with the message clients expect.
    pub fn parse_param(raw: &str) -> Result<Self, FitlogError> {
        Self::parse(raw).map_err(|_| FitlogError::invalid_argument(format!("Invalid workout ID: {raw}")))
    }
}

impl WeightId {
    /// Parses a path parameter, rejecting it with the message clients expect.
    pub fn parse_param(raw: &str) -> Result<Self, FitlogError> {
        Self::parse(raw).map_err(|_| FitlogError::invalid_argument("Invalid weightId"))
    }
}
