//! The permission enumeration used by ACL keys and authorization checks.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// The closed set of permissions that can be held on a securable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionType {
    /// Permission to discover that the object exists.
    Discover,
    /// Permission to link against the object.
    Link,
    /// Full ownership of the object.
    Owner,
    /// Permission to read the object.
    Read,
    /// Permission to write the object.
    Write,
}

impl PermissionType {
    /// The wire name of this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Discover => "DISCOVER",
            PermissionType::Link => "LINK",
            PermissionType::Owner => "OWNER",
            PermissionType::Read => "READ",
            PermissionType::Write => "WRITE",
        }
    }
}

impl Display for PermissionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DISCOVER" => Ok(PermissionType::Discover),
            "LINK" => Ok(PermissionType::Link),
            "OWNER" => Ok(PermissionType::Owner),
            "READ" => Ok(PermissionType::Read),
            "WRITE" => Ok(PermissionType::Write),
            _ => Err(ModelError::invalid(
                "permissions",
                "must be valid PermissionTypes",
            )),
        }
    }
}
