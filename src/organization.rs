//! Organizations: the top-level tenancy object, owning members, roles, and
//! auto-approved email domains.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ModelError;
use crate::principal::{Principal, is_valid_principal_slice};
use crate::validate::{is_non_empty_string, is_non_empty_string_slice};

/////////////////////////////////////////// Organization //////////////////////////////////////////

/// An immutable organization.
///
/// `title` is the only strictly required field; the id is absent until the
/// server assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organization {
    /// The server-assigned identifier; `None` on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// The display title; never empty.
    pub title: String,
    /// An optional free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member principals, in caller-supplied order.
    pub members: Vec<Principal>,
    /// Role principals, in caller-supplied order.
    pub roles: Vec<Principal>,
    /// Deduplicated auto-approved email domains.
    pub emails: Vec<String>,
}

impl Organization {
    /// Re-runs the builder against this instance's fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut builder = OrganizationBuilder::new().title(&self.title)?;
        if let Some(id) = self.id {
            builder = builder.id(&id.to_string())?;
        }
        if let Some(description) = &self.description {
            builder = builder.description(description)?;
        }
        builder = builder
            .members(&self.members)?
            .roles(&self.roles)?
            .emails(self.emails.iter().cloned())?;
        builder.build()?;
        Ok(())
    }
}

/////////////////////////////////////// OrganizationBuilder ///////////////////////////////////////

/// Accumulates validated fields and produces an [`Organization`].
///
/// Array-valued setters are all-or-nothing: a single invalid element fails
/// the whole call, and an empty input is a no-op.
#[derive(Debug, Default)]
pub struct OrganizationBuilder {
    id: Option<Uuid>,
    title: Option<String>,
    description: Option<String>,
    members: Option<Vec<Principal>>,
    roles: Option<Vec<Principal>>,
    emails: Option<Vec<String>>,
}

impl OrganizationBuilder {
    /// Creates an unconfigured builder.
    pub fn new() -> Self {
        OrganizationBuilder::default()
    }

    /// Sets the id from its string form.
    pub fn id(mut self, id: &str) -> Result<Self, ModelError> {
        let id = Uuid::try_parse(id).map_err(|_| ModelError::invalid("id", "must be a valid UUID"))?;
        self.id = Some(id);
        Ok(self)
    }

    /// Sets the title; must be non-empty.
    pub fn title(mut self, title: impl Into<String>) -> Result<Self, ModelError> {
        let title = title.into();
        if !is_non_empty_string(&title) {
            return Err(ModelError::invalid("title", "must be a non-empty string"));
        }
        self.title = Some(title);
        Ok(self)
    }

    /// Sets the description; must be non-empty when supplied.
    pub fn description(mut self, description: impl Into<String>) -> Result<Self, ModelError> {
        let description = description.into();
        if !is_non_empty_string(&description) {
            return Err(ModelError::invalid(
                "description",
                "must be a non-empty string",
            ));
        }
        self.description = Some(description);
        Ok(self)
    }

    /// Sets the member principals, preserving order. Empty input is a no-op.
    pub fn members(mut self, members: &[Principal]) -> Result<Self, ModelError> {
        if members.is_empty() {
            return Ok(self);
        }
        if !is_valid_principal_slice(members) {
            return Err(ModelError::invalid(
                "members",
                "must be a non-empty array of valid Principals",
            ));
        }
        self.members = Some(members.to_vec());
        Ok(self)
    }

    /// Sets the role principals, preserving order. Empty input is a no-op.
    pub fn roles(mut self, roles: &[Principal]) -> Result<Self, ModelError> {
        if roles.is_empty() {
            return Ok(self);
        }
        if !is_valid_principal_slice(roles) {
            return Err(ModelError::invalid(
                "roles",
                "must be a non-empty array of valid Principals",
            ));
        }
        self.roles = Some(roles.to_vec());
        Ok(self)
    }

    /// Sets the auto-approved email domains, deduplicating them. Empty input
    /// is a no-op.
    pub fn emails<I, S>(mut self, emails: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let emails: Vec<String> = emails.into_iter().map(Into::into).collect();
        if emails.is_empty() {
            return Ok(self);
        }
        if !is_non_empty_string_slice(&emails) {
            return Err(ModelError::invalid(
                "emails",
                "must be a non-empty array of strings",
            ));
        }
        let deduped: BTreeSet<String> = emails.into_iter().collect();
        self.emails = Some(deduped.into_iter().collect());
        Ok(self)
    }

    /// Checks that the title was set and produces the organization,
    /// defaulting every optional collection to empty.
    pub fn build(&self) -> Result<Organization, ModelError> {
        let title = self
            .title
            .clone()
            .ok_or(ModelError::MissingProperty("title"))?;
        Ok(Organization {
            id: self.id,
            title,
            description: self.description.clone(),
            members: self.members.clone().unwrap_or_default(),
            roles: self.roles.clone().unwrap_or_default(),
            emails: self.emails.clone().unwrap_or_default(),
        })
    }
}

//////////////////////////////////////////// Validity /////////////////////////////////////////////

#[derive(Deserialize)]
struct OrganizationCandidate {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    members: Option<Vec<Value>>,
    roles: Option<Vec<Value>>,
    emails: Option<Vec<String>>,
}

pub(crate) fn organization_from_value(value: &Value) -> Result<Organization, ModelError> {
    let candidate: OrganizationCandidate = serde_json::from_value(value.clone())
        .map_err(|_| ModelError::invalid("organization", "must be an object"))?;
    let mut builder = OrganizationBuilder::new();
    if let Some(id) = &candidate.id {
        builder = builder.id(id)?;
    }
    if let Some(title) = &candidate.title {
        builder = builder.title(title)?;
    }
    if let Some(description) = &candidate.description {
        builder = builder.description(description)?;
    }
    if let Some(members) = &candidate.members {
        builder = builder.members(&principals_from_values(members, "members")?)?;
    }
    if let Some(roles) = &candidate.roles {
        builder = builder.roles(&principals_from_values(roles, "roles")?)?;
    }
    if let Some(emails) = candidate.emails {
        builder = builder.emails(emails)?;
    }
    builder.build()
}

fn principals_from_values(values: &[Value], field: &'static str) -> Result<Vec<Principal>, ModelError> {
    values
        .iter()
        .map(|v| {
            crate::principal::principal_from_value(v).map_err(|_| {
                ModelError::invalid(field, "must be a non-empty array of valid Principals")
            })
        })
        .collect()
}

/// Returns true iff the value would survive [`OrganizationBuilder`]
/// construction.
pub fn is_valid_organization(value: &Value) -> bool {
    match organization_from_value(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "invalid organization");
            false
        }
    }
}
