//! Grants: how membership in a role is derived for an organization.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;
use crate::validate::is_non_empty_string_slice;

///////////////////////////////////////////// GrantType ///////////////////////////////////////////

/// The closed set of grant mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantType {
    /// Granted when user attributes match the mappings.
    Attributes,
    /// Granted to every member automatically.
    Automatic,
    /// Granted when a token claim matches the mappings.
    Claim,
    /// Granted by email domain.
    EmailDomain,
    /// Granted by group membership.
    Groups,
    /// Granted and revoked by hand.
    Manual,
    /// Granted by holding another role.
    Roles,
}

impl GrantType {
    /// The wire name of this grant type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Attributes => "ATTRIBUTES",
            GrantType::Automatic => "AUTOMATIC",
            GrantType::Claim => "CLAIM",
            GrantType::EmailDomain => "EMAIL_DOMAIN",
            GrantType::Groups => "GROUPS",
            GrantType::Manual => "MANUAL",
            GrantType::Roles => "ROLES",
        }
    }
}

impl Display for GrantType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATTRIBUTES" => Ok(GrantType::Attributes),
            "AUTOMATIC" => Ok(GrantType::Automatic),
            "CLAIM" => Ok(GrantType::Claim),
            "EMAIL_DOMAIN" => Ok(GrantType::EmailDomain),
            "GROUPS" => Ok(GrantType::Groups),
            "MANUAL" => Ok(GrantType::Manual),
            "ROLES" => Ok(GrantType::Roles),
            _ => Err(ModelError::invalid("grantType", "must be a valid GrantType")),
        }
    }
}

/////////////////////////////////////////////// Grant /////////////////////////////////////////////

/// An immutable grant: a mechanism plus the mappings it keys off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    /// The grant mechanism.
    pub grant_type: GrantType,
    /// Deduplicated mapping values; empty for mechanisms that need none.
    pub mappings: Vec<String>,
}

impl Grant {
    /// Re-runs the builder against this instance's fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        GrantBuilder::new()
            .grant_type(self.grant_type)
            .mappings(self.mappings.iter().cloned())?
            .build()?;
        Ok(())
    }
}

/////////////////////////////////////////// GrantBuilder //////////////////////////////////////////

/// Accumulates validated fields and produces a [`Grant`].
#[derive(Debug, Default)]
pub struct GrantBuilder {
    grant_type: Option<GrantType>,
    mappings: Option<Vec<String>>,
}

impl GrantBuilder {
    /// Creates an unconfigured builder.
    pub fn new() -> Self {
        GrantBuilder::default()
    }

    /// Sets the grant type.
    pub fn grant_type(mut self, grant_type: GrantType) -> Self {
        self.grant_type = Some(grant_type);
        self
    }

    /// Sets the mappings, deduplicating them. An empty input is a no-op so
    /// callers can chain unconditionally; an input containing an empty
    /// string fails the whole call.
    pub fn mappings<I, S>(mut self, mappings: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mappings: Vec<String> = mappings.into_iter().map(Into::into).collect();
        if mappings.is_empty() {
            return Ok(self);
        }
        if !is_non_empty_string_slice(&mappings) {
            return Err(ModelError::invalid(
                "mappings",
                "must be a non-empty array of strings",
            ));
        }
        let deduped: BTreeSet<String> = mappings.into_iter().collect();
        self.mappings = Some(deduped.into_iter().collect());
        Ok(self)
    }

    /// Checks that the grant type was set and produces the grant, defaulting
    /// mappings to empty.
    pub fn build(&self) -> Result<Grant, ModelError> {
        let grant_type = self
            .grant_type
            .ok_or(ModelError::MissingProperty("grantType"))?;
        Ok(Grant {
            grant_type,
            mappings: self.mappings.clone().unwrap_or_default(),
        })
    }
}

//////////////////////////////////////////// Validity /////////////////////////////////////////////

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrantCandidate {
    grant_type: Option<String>,
    mappings: Option<Vec<String>>,
}

pub(crate) fn grant_from_value(value: &Value) -> Result<Grant, ModelError> {
    let candidate: GrantCandidate = serde_json::from_value(value.clone())
        .map_err(|_| ModelError::invalid("grant", "must be an object"))?;
    let mut builder = GrantBuilder::new();
    if let Some(grant_type) = &candidate.grant_type {
        builder = builder.grant_type(grant_type.parse()?);
    }
    if let Some(mappings) = candidate.mappings {
        builder = builder.mappings(mappings)?;
    }
    builder.build()
}

/// Returns true iff the value would survive [`GrantBuilder`] construction.
pub fn is_valid_grant(value: &Value) -> bool {
    match grant_from_value(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "invalid grant");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_round_trip() {
        let grant = GrantBuilder::new()
            .grant_type(GrantType::EmailDomain)
            .mappings(["openlattice.com"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(grant.grant_type, GrantType::EmailDomain);
        assert_eq!(grant.mappings, vec!["openlattice.com"]);
    }

    #[test]
    fn build_requires_grant_type() {
        let err = GrantBuilder::new().build().unwrap_err();
        assert_eq!(err, ModelError::MissingProperty("grantType"));
    }

    #[test]
    fn mappings_default_to_empty() {
        let grant = GrantBuilder::new()
            .grant_type(GrantType::Manual)
            .build()
            .unwrap();
        assert!(grant.mappings.is_empty());
    }

    #[test]
    fn empty_mappings_input_is_a_no_op() {
        let grant = GrantBuilder::new()
            .grant_type(GrantType::Manual)
            .mappings(Vec::<String>::new())
            .unwrap()
            .build()
            .unwrap();
        assert!(grant.mappings.is_empty());
    }

    #[test]
    fn mappings_reject_empty_strings() {
        let err = GrantBuilder::new().mappings(["a", ""]).unwrap_err();
        assert_eq!(
            err,
            ModelError::invalid("mappings", "must be a non-empty array of strings")
        );
    }

    #[test]
    fn mappings_are_deduplicated() {
        let grant = GrantBuilder::new()
            .grant_type(GrantType::Attributes)
            .mappings(["a", "a", "b"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(grant.mappings.len(), 2);
        assert!(grant.mappings.contains(&"a".to_string()));
        assert!(grant.mappings.contains(&"b".to_string()));
    }

    #[test]
    fn build_twice_yields_equal_instances() {
        let builder = GrantBuilder::new()
            .grant_type(GrantType::Groups)
            .mappings(["g1", "g2", "g1"])
            .unwrap();
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn grant_type_parses_wire_names_only() {
        assert_eq!("EMAIL_DOMAIN".parse::<GrantType>().unwrap(), GrantType::EmailDomain);
        assert!("EmailDomain".parse::<GrantType>().is_err());
        assert!("".parse::<GrantType>().is_err());
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let grant = GrantBuilder::new()
            .grant_type(GrantType::Claim)
            .mappings(["claim0"])
            .unwrap()
            .build()
            .unwrap();
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json, json!({ "grantType": "CLAIM", "mappings": ["claim0"] }));
    }

    #[test]
    fn validity_predicate() {
        assert!(is_valid_grant(&json!({ "grantType": "MANUAL" })));
        assert!(is_valid_grant(&json!({ "grantType": "GROUPS", "mappings": ["g"] })));
        assert!(!is_valid_grant(&json!(null)));
        assert!(!is_valid_grant(&json!({})));
        assert!(!is_valid_grant(&json!({ "grantType": "NOPE" })));
        assert!(!is_valid_grant(&json!({ "grantType": "GROUPS", "mappings": [""] })));
    }
}
