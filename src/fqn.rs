//! Fully qualified names: the `namespace.name` pairs that address entity
//! and property types in the data model.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;
use crate::validate::{is_non_empty_string, validate_non_empty_slice};

/// A namespaced type name. The namespace may not contain `.`; the name may.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FullyQualifiedName {
    /// The namespace part; non-empty, no dots.
    pub namespace: String,
    /// The name part; non-empty.
    pub name: String,
}

impl FullyQualifiedName {
    /// Builds a validated FQN from its two parts.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let namespace = namespace.into();
        let name = name.into();
        if !is_non_empty_string(&namespace) || namespace.contains('.') {
            return Err(ModelError::invalid(
                "namespace",
                "must be a non-empty string without dots",
            ));
        }
        if !is_non_empty_string(&name) {
            return Err(ModelError::invalid("name", "must be a non-empty string"));
        }
        Ok(FullyQualifiedName { namespace, name })
    }

    /// Re-runs validation against this instance's fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        FullyQualifiedName::new(&self.namespace, &self.name)?;
        Ok(())
    }
}

impl Display for FullyQualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for FullyQualifiedName {
    type Err = ModelError;

    /// Splits at the first dot, so names may themselves contain dots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s.split_once('.').ok_or(ModelError::invalid(
            "fqn",
            "must be of the form namespace.name",
        ))?;
        FullyQualifiedName::new(namespace, name)
    }
}

pub(crate) fn fqn_from_value(value: &Value) -> Result<FullyQualifiedName, ModelError> {
    let fqn: FullyQualifiedName = serde_json::from_value(value.clone())
        .map_err(|_| ModelError::invalid("fqn", "must be an object with namespace and name"))?;
    fqn.validate()?;
    Ok(fqn)
}

/// Returns true iff the value is a structurally valid FQN object literal.
pub fn is_valid_fqn(value: &Value) -> bool {
    match fqn_from_value(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "invalid fully qualified name");
            false
        }
    }
}

/// Returns true iff the slice is non-empty and every FQN validates.
pub fn is_valid_fqn_slice(fqns: &[FullyQualifiedName]) -> bool {
    validate_non_empty_slice(fqns, |f| f.validate().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_validates_both_parts() {
        let fqn = FullyQualifiedName::new("LATTICE", "MyEntity").unwrap();
        assert_eq!(fqn.namespace, "LATTICE");
        assert_eq!(fqn.name, "MyEntity");
        assert!(FullyQualifiedName::new("", "MyEntity").is_err());
        assert!(FullyQualifiedName::new("LATTICE", "").is_err());
        assert!(FullyQualifiedName::new("LAT.TICE", "MyEntity").is_err());
    }

    #[test]
    fn parses_at_the_first_dot() {
        let fqn: FullyQualifiedName = "LATTICE.My.Entity".parse().unwrap();
        assert_eq!(fqn.namespace, "LATTICE");
        assert_eq!(fqn.name, "My.Entity");
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        assert!("nodots".parse::<FullyQualifiedName>().is_err());
        assert!(".name".parse::<FullyQualifiedName>().is_err());
        assert!("namespace.".parse::<FullyQualifiedName>().is_err());
        assert!("".parse::<FullyQualifiedName>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let fqn = FullyQualifiedName::new("NS", "Name").unwrap();
        assert_eq!(fqn.to_string(), "NS.Name");
        assert_eq!(fqn.to_string().parse::<FullyQualifiedName>().unwrap(), fqn);
    }

    #[test]
    fn validity_predicate() {
        assert!(is_valid_fqn(&json!({ "namespace": "NS", "name": "N" })));
        assert!(!is_valid_fqn(&json!(null)));
        assert!(!is_valid_fqn(&json!({})));
        assert!(!is_valid_fqn(&json!({ "namespace": "NS" })));
        assert!(!is_valid_fqn(&json!({ "namespace": "", "name": "N" })));
        assert!(!is_valid_fqn(&json!("NS.N")));
    }

    #[test]
    fn slice_validation_is_all_or_nothing() {
        let good = FullyQualifiedName::new("NS", "N").unwrap();
        let bad = FullyQualifiedName {
            namespace: String::new(),
            name: "N".to_string(),
        };
        assert!(is_valid_fqn_slice(&[good.clone()]));
        assert!(!is_valid_fqn_slice(&[]));
        assert!(!is_valid_fqn_slice(&[good, bad]));
    }
}
