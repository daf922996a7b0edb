//! The organizations API: CRUD on organizations plus their titles,
//! descriptions, auto-approved email domains, principals, roles, members,
//! and role grants.
//!
//! Every function validates its arguments before any network traffic and
//! propagates all failures as explicit errors.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::errors::ClientError;
use crate::grant::Grant;
use crate::http::{ApiName, LatticeClient};
use crate::organization::Organization;
use crate::principal::{Principal, PrincipalType, is_valid_principal_slice};
use crate::validate::{is_non_empty_string, is_non_empty_string_slice};

const DESCRIPTION_PATH: &str = "description";
const EMAIL_DOMAINS_PATH: &str = "email-domains";
const GRANT_PATH: &str = "grant";
const MEMBERS_PATH: &str = "members";
const PRINCIPALS_PATH: &str = "principals";
const ROLES_PATH: &str = "roles";
const TITLE_PATH: &str = "title";

fn reject(message: &str) -> ClientError {
    ClientError::InvalidParameter(message.to_string())
}

/// `GET /organizations/{uuid}`
///
/// Gets the organization with the given id.
pub async fn get_organization(
    client: &LatticeClient,
    organization_id: Uuid,
) -> Result<Organization, ClientError> {
    client
        .get(ApiName::Organizations, &organization_id.to_string())
        .await
}

/// `GET /organizations`
///
/// Gets all organizations.
pub async fn get_all_organizations(
    client: &LatticeClient,
) -> Result<Vec<Organization>, ClientError> {
    client.get(ApiName::Organizations, "").await
}

/// `POST /organizations`
///
/// Creates a new organization and returns its server-assigned id.
pub async fn create_organization(
    client: &LatticeClient,
    organization: &Organization,
) -> Result<Uuid, ClientError> {
    organization.validate()?;
    client.post(ApiName::Organizations, "", organization).await
}

/// `DELETE /organizations/{uuid}`
///
/// Deletes the organization with the given id.
pub async fn delete_organization(
    client: &LatticeClient,
    organization_id: Uuid,
) -> Result<(), ClientError> {
    client
        .delete(ApiName::Organizations, &organization_id.to_string())
        .await
}

/// `PUT /organizations/{uuid}/title`
///
/// Replaces the organization's title.
pub async fn update_title(
    client: &LatticeClient,
    organization_id: Uuid,
    title: &str,
) -> Result<(), ClientError> {
    if !is_non_empty_string(title) {
        return Err(reject("title must be a non-empty string"));
    }
    let path = format!("{}/{}", organization_id, TITLE_PATH);
    client
        .put_no_content(ApiName::Organizations, &path, &title)
        .await
}

/// `PUT /organizations/{uuid}/description`
///
/// Replaces the organization's description.
pub async fn update_description(
    client: &LatticeClient,
    organization_id: Uuid,
    description: &str,
) -> Result<(), ClientError> {
    if !is_non_empty_string(description) {
        return Err(reject("description must be a non-empty string"));
    }
    let path = format!("{}/{}", organization_id, DESCRIPTION_PATH);
    client
        .put_no_content(ApiName::Organizations, &path, &description)
        .await
}

/// `GET /organizations/{uuid}/email-domains`
///
/// Gets the organization's auto-approved email domains.
pub async fn get_auto_approved_email_domains(
    client: &LatticeClient,
    organization_id: Uuid,
) -> Result<Vec<String>, ClientError> {
    let path = format!("{}/{}", organization_id, EMAIL_DOMAINS_PATH);
    client.get(ApiName::Organizations, &path).await
}

/// `PUT /organizations/{uuid}/email-domains/{domain}`
///
/// Adds one auto-approved email domain.
pub async fn add_auto_approved_email_domain(
    client: &LatticeClient,
    organization_id: Uuid,
    email_domain: &str,
) -> Result<(), ClientError> {
    if !is_non_empty_string(email_domain) {
        return Err(reject("emailDomain must be a non-empty string"));
    }
    let path = format!("{}/{}/{}", organization_id, EMAIL_DOMAINS_PATH, email_domain);
    client.put_empty(ApiName::Organizations, &path).await
}

/// `POST /organizations/{uuid}/email-domains`
///
/// Adds the given auto-approved email domains, deduplicated.
pub async fn add_auto_approved_email_domains(
    client: &LatticeClient,
    organization_id: Uuid,
    email_domains: &[String],
) -> Result<(), ClientError> {
    if !is_non_empty_string_slice(email_domains) {
        return Err(reject("emailDomains must be a non-empty array of strings"));
    }
    let deduped: BTreeSet<&String> = email_domains.iter().collect();
    let path = format!("{}/{}", organization_id, EMAIL_DOMAINS_PATH);
    client
        .post_no_content(ApiName::Organizations, &path, &deduped)
        .await
}

/// `PUT /organizations/{uuid}/email-domains`
///
/// Replaces the set of auto-approved email domains, deduplicated.
pub async fn set_auto_approved_email_domains(
    client: &LatticeClient,
    organization_id: Uuid,
    email_domains: &[String],
) -> Result<(), ClientError> {
    if !is_non_empty_string_slice(email_domains) {
        return Err(reject("emailDomains must be a non-empty array of strings"));
    }
    let deduped: BTreeSet<&String> = email_domains.iter().collect();
    let path = format!("{}/{}", organization_id, EMAIL_DOMAINS_PATH);
    client
        .put_no_content(ApiName::Organizations, &path, &deduped)
        .await
}

/// `DELETE /organizations/{uuid}/email-domains/{domain}`
///
/// Removes one auto-approved email domain.
pub async fn remove_auto_approved_email_domain(
    client: &LatticeClient,
    organization_id: Uuid,
    email_domain: &str,
) -> Result<(), ClientError> {
    if !is_non_empty_string(email_domain) {
        return Err(reject("emailDomain must be a non-empty string"));
    }
    let path = format!("{}/{}/{}", organization_id, EMAIL_DOMAINS_PATH, email_domain);
    client.delete(ApiName::Organizations, &path).await
}

/// `DELETE /organizations/{uuid}/email-domains`
///
/// Removes the given auto-approved email domains, deduplicated.
pub async fn remove_auto_approved_email_domains(
    client: &LatticeClient,
    organization_id: Uuid,
    email_domains: &[String],
) -> Result<(), ClientError> {
    if !is_non_empty_string_slice(email_domains) {
        return Err(reject("emailDomains must be a non-empty array of strings"));
    }
    let deduped: BTreeSet<&String> = email_domains.iter().collect();
    let path = format!("{}/{}", organization_id, EMAIL_DOMAINS_PATH);
    client
        .delete_with_body(ApiName::Organizations, &path, &deduped)
        .await
}

/// `GET /organizations/{uuid}/principals`
///
/// Gets all principals of the organization.
pub async fn get_all_principals(
    client: &LatticeClient,
    organization_id: Uuid,
) -> Result<Vec<Principal>, ClientError> {
    let path = format!("{}/{}", organization_id, PRINCIPALS_PATH);
    client.get(ApiName::Organizations, &path).await
}

/// `PUT /organizations/{uuid}/principals/{type}/{id}`
///
/// Adds one principal to the organization.
pub async fn add_principal(
    client: &LatticeClient,
    organization_id: Uuid,
    principal_type: PrincipalType,
    principal_id: &str,
) -> Result<(), ClientError> {
    if !is_non_empty_string(principal_id) {
        return Err(reject("principalId must be a non-empty string"));
    }
    let path = format!(
        "{}/{}/{}/{}",
        organization_id, PRINCIPALS_PATH, principal_type, principal_id
    );
    client.put_empty(ApiName::Organizations, &path).await
}

/// `POST /organizations/{uuid}/principals`
///
/// Adds the given principals to the organization, deduplicated.
pub async fn add_principals(
    client: &LatticeClient,
    organization_id: Uuid,
    principals: &[Principal],
) -> Result<(), ClientError> {
    if !is_valid_principal_slice(principals) {
        return Err(reject(
            "principals must be a non-empty array of valid Principals",
        ));
    }
    let deduped: BTreeSet<&Principal> = principals.iter().collect();
    let path = format!("{}/{}", organization_id, PRINCIPALS_PATH);
    client
        .post_no_content(ApiName::Organizations, &path, &deduped)
        .await
}

/// `PUT /organizations/{uuid}/principals`
///
/// Replaces the organization's principals, deduplicated.
pub async fn set_principals(
    client: &LatticeClient,
    organization_id: Uuid,
    principals: &[Principal],
) -> Result<(), ClientError> {
    if !is_valid_principal_slice(principals) {
        return Err(reject(
            "principals must be a non-empty array of valid Principals",
        ));
    }
    let deduped: BTreeSet<&Principal> = principals.iter().collect();
    let path = format!("{}/{}", organization_id, PRINCIPALS_PATH);
    client
        .put_no_content(ApiName::Organizations, &path, &deduped)
        .await
}

/// `DELETE /organizations/{uuid}/principals/{type}/{id}`
///
/// Removes one principal from the organization.
pub async fn remove_principal(
    client: &LatticeClient,
    organization_id: Uuid,
    principal_type: PrincipalType,
    principal_id: &str,
) -> Result<(), ClientError> {
    if !is_non_empty_string(principal_id) {
        return Err(reject("principalId must be a non-empty string"));
    }
    let path = format!(
        "{}/{}/{}/{}",
        organization_id, PRINCIPALS_PATH, principal_type, principal_id
    );
    client.delete(ApiName::Organizations, &path).await
}

/// `DELETE /organizations/{uuid}/principals`
///
/// Removes the given principals from the organization, deduplicated.
pub async fn remove_principals(
    client: &LatticeClient,
    organization_id: Uuid,
    principals: &[Principal],
) -> Result<(), ClientError> {
    if !is_valid_principal_slice(principals) {
        return Err(reject(
            "principals must be a non-empty array of valid Principals",
        ));
    }
    let deduped: BTreeSet<&Principal> = principals.iter().collect();
    let path = format!("{}/{}", organization_id, PRINCIPALS_PATH);
    client
        .delete_with_body(ApiName::Organizations, &path, &deduped)
        .await
}

/// `GET /organizations/{uuid}/principals/roles`
///
/// Gets all roles of the organization.
pub async fn get_all_roles(
    client: &LatticeClient,
    organization_id: Uuid,
) -> Result<Vec<Principal>, ClientError> {
    let path = format!("{}/{}/{}", organization_id, PRINCIPALS_PATH, ROLES_PATH);
    client.get(ApiName::Organizations, &path).await
}

/// `GET /organizations/{uuid}/principals/members`
///
/// Gets all members of the organization.
pub async fn get_all_members(
    client: &LatticeClient,
    organization_id: Uuid,
) -> Result<Vec<Principal>, ClientError> {
    let path = format!("{}/{}/{}", organization_id, PRINCIPALS_PATH, MEMBERS_PATH);
    client.get(ApiName::Organizations, &path).await
}

/// `PUT /organizations/{uuid}/principals/roles/{roleId}/grant`
///
/// Replaces the grant attached to the given role.
pub async fn update_role_grant(
    client: &LatticeClient,
    organization_id: Uuid,
    role_id: Uuid,
    grant: &Grant,
) -> Result<(), ClientError> {
    grant.validate()?;
    let path = format!(
        "{}/{}/{}/{}/{}",
        organization_id, PRINCIPALS_PATH, ROLES_PATH, role_id, GRANT_PATH
    );
    client.put_no_content(ApiName::Organizations, &path, grant).await
}
