//! The authorization API: bulk permission checks against securable objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access_check::{AccessCheck, is_valid_access_check_slice};
use crate::errors::ClientError;
use crate::http::{ApiName, LatticeClient};
use crate::permission::PermissionType;

/// One entry of the authorization-check response: for each requested
/// permission, whether the caller holds it on the ACL key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// The securable object's key path, echoing the request.
    pub acl_key: Vec<Uuid>,
    /// Per-permission results.
    pub permissions: BTreeMap<PermissionType, bool>,
}

/// `POST /authorizations`
///
/// Runs the given access checks and returns one authorization per check.
pub async fn check_authorizations(
    client: &LatticeClient,
    checks: &[AccessCheck],
) -> Result<Vec<Authorization>, ClientError> {
    if !is_valid_access_check_slice(checks) {
        return Err(ClientError::InvalidParameter(
            "checks must be a non-empty array of valid AccessChecks".to_string(),
        ));
    }
    client.post(ApiName::Authorizations, "", &checks).await
}
