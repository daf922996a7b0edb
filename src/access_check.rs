//! Access checks: the request shape of the authorization endpoint, pairing
//! an ACL key (an ordered path of UUIDs naming a securable object) with the
//! permissions to test.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ModelError;
use crate::permission::PermissionType;

/////////////////////////////////////////// AccessCheck ///////////////////////////////////////////

/// An immutable authorization query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheck {
    /// The securable object's key path, in caller-supplied order.
    pub acl_key: Vec<Uuid>,
    /// The deduplicated permissions to check.
    pub permissions: Vec<PermissionType>,
}

impl AccessCheck {
    /// Re-runs the builder against this instance's fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        let keys: Vec<String> = self.acl_key.iter().map(Uuid::to_string).collect();
        AccessCheckBuilder::new()
            .acl_key(&keys)?
            .permissions(&self.permissions)
            .build()?;
        Ok(())
    }
}

//////////////////////////////////////// AccessCheckBuilder ///////////////////////////////////////

/// Accumulates validated fields and produces an [`AccessCheck`].
///
/// Both fields are optional and default to empty; each supplied element must
/// individually validate.
#[derive(Debug, Default)]
pub struct AccessCheckBuilder {
    acl_key: Option<Vec<Uuid>>,
    permissions: Option<Vec<PermissionType>>,
}

impl AccessCheckBuilder {
    /// Creates an unconfigured builder.
    pub fn new() -> Self {
        AccessCheckBuilder::default()
    }

    /// Sets the ACL key from UUID strings, preserving input order. An empty
    /// input is a no-op; a single unparseable element fails the whole call.
    pub fn acl_key<S: AsRef<str>>(mut self, acl_key: &[S]) -> Result<Self, ModelError> {
        if acl_key.is_empty() {
            return Ok(self);
        }
        let parsed: Result<Vec<Uuid>, _> = acl_key
            .iter()
            .map(|k| Uuid::try_parse(k.as_ref()))
            .collect();
        let parsed = parsed
            .map_err(|_| ModelError::invalid("aclKey", "must be an array of valid UUIDs"))?;
        self.acl_key = Some(parsed);
        Ok(self)
    }

    /// Sets the permissions, deduplicating them. An empty input is a no-op.
    pub fn permissions(mut self, permissions: &[PermissionType]) -> Self {
        if permissions.is_empty() {
            return self;
        }
        let deduped: BTreeSet<PermissionType> = permissions.iter().copied().collect();
        self.permissions = Some(deduped.into_iter().collect());
        self
    }

    /// Produces the access check, defaulting unset fields to empty.
    pub fn build(&self) -> Result<AccessCheck, ModelError> {
        Ok(AccessCheck {
            acl_key: self.acl_key.clone().unwrap_or_default(),
            permissions: self.permissions.clone().unwrap_or_default(),
        })
    }
}

//////////////////////////////////////////// Validity /////////////////////////////////////////////

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessCheckCandidate {
    acl_key: Option<Vec<String>>,
    permissions: Option<Vec<String>>,
}

pub(crate) fn access_check_from_value(value: &Value) -> Result<AccessCheck, ModelError> {
    let candidate: AccessCheckCandidate = serde_json::from_value(value.clone())
        .map_err(|_| ModelError::invalid("accessCheck", "must be an object"))?;
    // Both keys must be present even though their contents may be empty.
    let (Some(acl_key), Some(permissions)) = (candidate.acl_key, candidate.permissions) else {
        return Err(ModelError::invalid(
            "accessCheck",
            "is missing required properties",
        ));
    };
    let permissions: Result<Vec<PermissionType>, _> =
        permissions.iter().map(|p| p.parse()).collect();
    let builder = AccessCheckBuilder::new()
        .acl_key(&acl_key)?
        .permissions(&permissions?);
    builder.build()
}

/// Returns true iff the value would survive [`AccessCheckBuilder`]
/// construction and carries both structural keys.
pub fn is_valid_access_check(value: &Value) -> bool {
    match access_check_from_value(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "invalid access check");
            false
        }
    }
}

/// Returns true iff the slice is non-empty and every access check validates.
pub fn is_valid_access_check_slice(checks: &[AccessCheck]) -> bool {
    crate::validate::validate_non_empty_slice(checks, |c| c.validate().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UUID_0: &str = "ec6865e6-e60e-424b-a071-6a9c1603d735";
    const UUID_1: &str = "8f79e123-3411-4099-a41f-88e5d22d0e8d";

    #[test]
    fn builder_round_trip() {
        let check = AccessCheckBuilder::new()
            .acl_key(&[UUID_0, UUID_1])
            .unwrap()
            .permissions(&[PermissionType::Read, PermissionType::Write])
            .build()
            .unwrap();
        assert_eq!(check.acl_key.len(), 2);
        assert_eq!(check.acl_key[0].to_string(), UUID_0);
        assert_eq!(check.acl_key[1].to_string(), UUID_1);
        assert_eq!(
            check.permissions,
            vec![PermissionType::Read, PermissionType::Write]
        );
    }

    #[test]
    fn both_fields_default_to_empty() {
        let check = AccessCheckBuilder::new().build().unwrap();
        assert!(check.acl_key.is_empty());
        assert!(check.permissions.is_empty());
    }

    #[test]
    fn empty_inputs_are_no_ops() {
        let empty: [&str; 0] = [];
        let check = AccessCheckBuilder::new()
            .acl_key(&empty)
            .unwrap()
            .permissions(&[])
            .build()
            .unwrap();
        assert!(check.acl_key.is_empty());
        assert!(check.permissions.is_empty());
    }

    #[test]
    fn acl_key_rejects_invalid_uuids() {
        let err = AccessCheckBuilder::new()
            .acl_key(&[UUID_0, "not-a-uuid"])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::invalid("aclKey", "must be an array of valid UUIDs")
        );
    }

    #[test]
    fn acl_key_preserves_order() {
        let check = AccessCheckBuilder::new()
            .acl_key(&[UUID_1, UUID_0])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(check.acl_key[0].to_string(), UUID_1);
        assert_eq!(check.acl_key[1].to_string(), UUID_0);
    }

    #[test]
    fn permissions_are_deduplicated() {
        let check = AccessCheckBuilder::new()
            .permissions(&[
                PermissionType::Write,
                PermissionType::Read,
                PermissionType::Write,
            ])
            .build()
            .unwrap();
        assert_eq!(
            check.permissions,
            vec![PermissionType::Read, PermissionType::Write]
        );
    }

    #[test]
    fn build_twice_yields_equal_instances() {
        let builder = AccessCheckBuilder::new()
            .acl_key(&[UUID_0])
            .unwrap()
            .permissions(&[PermissionType::Owner]);
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn validity_predicate_requires_both_keys() {
        assert!(is_valid_access_check(&json!({
            "aclKey": [UUID_0],
            "permissions": ["READ"],
        })));
        assert!(is_valid_access_check(&json!({
            "aclKey": [],
            "permissions": [],
        })));
        assert!(!is_valid_access_check(&json!(null)));
        assert!(!is_valid_access_check(&json!({})));
        assert!(!is_valid_access_check(&json!({ "aclKey": [UUID_0] })));
        assert!(!is_valid_access_check(&json!({ "permissions": ["READ"] })));
        assert!(!is_valid_access_check(&json!({
            "aclKey": ["nope"],
            "permissions": ["READ"],
        })));
        assert!(!is_valid_access_check(&json!({
            "aclKey": [UUID_0],
            "permissions": ["EXECUTE"],
        })));
    }

    #[test]
    fn slice_validation_is_all_or_nothing() {
        let check = AccessCheckBuilder::new().build().unwrap();
        assert!(is_valid_access_check_slice(&[check]));
        assert!(!is_valid_access_check_slice(&[]));
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let check = AccessCheckBuilder::new()
            .acl_key(&[UUID_0])
            .unwrap()
            .permissions(&[PermissionType::Read])
            .build()
            .unwrap();
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json, json!({ "aclKey": [UUID_0], "permissions": ["READ"] }));
    }
}
