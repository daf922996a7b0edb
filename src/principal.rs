//! Principals: the security subjects (users, roles, organizations, apps)
//! referenced throughout the permission surface.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;
use crate::validate::{is_non_empty_string, validate_non_empty_slice};

/////////////////////////////////////////// PrincipalType /////////////////////////////////////////

/// The closed set of principal kinds recognized by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrincipalType {
    /// An application acting on behalf of users.
    App,
    /// An organization-level principal.
    Organization,
    /// A role that can be granted to users.
    Role,
    /// An individual user.
    User,
}

impl PrincipalType {
    /// The wire name of this principal type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::App => "APP",
            PrincipalType::Organization => "ORGANIZATION",
            PrincipalType::Role => "ROLE",
            PrincipalType::User => "USER",
        }
    }
}

impl Display for PrincipalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrincipalType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APP" => Ok(PrincipalType::App),
            "ORGANIZATION" => Ok(PrincipalType::Organization),
            "ROLE" => Ok(PrincipalType::Role),
            "USER" => Ok(PrincipalType::User),
            _ => Err(ModelError::invalid("type", "must be a valid PrincipalType")),
        }
    }
}

///////////////////////////////////////////// Principal ///////////////////////////////////////////

/// An immutable (type, id) pair naming a security subject.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// The kind of principal.
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
    /// The principal's identifier within its kind; never empty.
    pub id: String,
}

impl Principal {
    /// Re-runs the builder against this instance's fields.
    ///
    /// Instances deserialized from the wire may carry an empty id; this is
    /// the single source of truth for rejecting them.
    pub fn validate(&self) -> Result<(), ModelError> {
        PrincipalBuilder::new()
            .principal_type(self.principal_type)
            .id(&self.id)?
            .build()?;
        Ok(())
    }
}

////////////////////////////////////////// PrincipalBuilder ///////////////////////////////////////

/// Accumulates validated fields and produces a [`Principal`].
#[derive(Debug, Default)]
pub struct PrincipalBuilder {
    principal_type: Option<PrincipalType>,
    id: Option<String>,
}

impl PrincipalBuilder {
    /// Creates an unconfigured builder.
    pub fn new() -> Self {
        PrincipalBuilder::default()
    }

    /// Sets the principal type. The closed enum makes this infallible; a
    /// string input goes through `PrincipalType::from_str` first.
    pub fn principal_type(mut self, principal_type: PrincipalType) -> Self {
        self.principal_type = Some(principal_type);
        self
    }

    /// Sets the principal id; must be non-empty.
    pub fn id(mut self, id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if !is_non_empty_string(&id) {
            return Err(ModelError::invalid("id", "must be a non-empty string"));
        }
        self.id = Some(id);
        Ok(self)
    }

    /// Checks that both required fields were set and produces the principal.
    pub fn build(&self) -> Result<Principal, ModelError> {
        let principal_type = self
            .principal_type
            .ok_or(ModelError::MissingProperty("type"))?;
        let id = self.id.clone().ok_or(ModelError::MissingProperty("id"))?;
        Ok(Principal { principal_type, id })
    }
}

//////////////////////////////////////////// Validity /////////////////////////////////////////////

#[derive(Deserialize)]
struct PrincipalCandidate {
    #[serde(rename = "type")]
    principal_type: Option<String>,
    id: Option<String>,
}

pub(crate) fn principal_from_value(value: &Value) -> Result<Principal, ModelError> {
    let candidate: PrincipalCandidate = serde_json::from_value(value.clone())
        .map_err(|_| ModelError::invalid("principal", "must be an object"))?;
    let mut builder = PrincipalBuilder::new();
    if let Some(principal_type) = &candidate.principal_type {
        builder = builder.principal_type(principal_type.parse()?);
    }
    if let Some(id) = &candidate.id {
        builder = builder.id(id)?;
    }
    builder.build()
}

/// Returns true iff the value would survive [`PrincipalBuilder`] construction.
pub fn is_valid_principal(value: &Value) -> bool {
    match principal_from_value(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "invalid principal");
            false
        }
    }
}

/// Returns true iff the slice is non-empty and every principal validates.
pub fn is_valid_principal_slice(principals: &[Principal]) -> bool {
    validate_non_empty_slice(principals, |p| p.validate().is_ok())
}
