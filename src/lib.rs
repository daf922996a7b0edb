//! # lattice-client: a typed client for the Lattice data-model platform
//!
//! This crate exposes the platform's REST surface — entity data,
//! organizations, principals, permissions — as typed function calls. Each
//! API module maps one-to-one onto a REST resource family: it validates its
//! arguments, assembles a URL, performs the HTTP call through a shared
//! [`LatticeClient`], and deserializes the response body.
//!
//! ## Models and builders
//!
//! Domain objects ([`Organization`], [`Principal`], [`Grant`],
//! [`AccessCheck`], and the generic [`Model`] template) are immutable value
//! objects created exclusively through paired builders. Builders fail fast:
//! each setter validates its input the moment it is called, and `build()`
//! only checks that required fields were set, filling documented defaults
//! for the rest.
//!
//! ```rust
//! use lattice_client::OrganizationBuilder;
//!
//! let org = OrganizationBuilder::new()
//!     .title("Acme")?
//!     .emails(["acme.com", "acme.com"])?
//!     .build()?;
//! assert_eq!(org.title, "Acme");
//! assert_eq!(org.emails, vec!["acme.com"]); // deduplicated
//! assert!(org.members.is_empty());
//! # Ok::<(), lattice_client::ModelError>(())
//! ```
//!
//! ## Validity predicates
//!
//! Every model has an `is_valid_*` predicate over `serde_json::Value` that
//! re-runs the builder against the candidate's fields, so there is exactly
//! one source of truth for what makes a model valid. Predicates never panic
//! and never error; failures are logged at `warn` and mapped to `false`.
//!
//! ## Error policy
//!
//! All failures are explicit `Err` values: argument preconditions reject
//! before any network traffic, non-success HTTP statuses become
//! [`ClientError::Api`], and connection failures become
//! [`ClientError::Transport`]. Nothing is logged-and-swallowed.
//!
//! ## Making calls
//!
//! ```rust,no_run
//! use lattice_client::{ClientConfig, Environment, LatticeClient, organizations_api};
//!
//! # async fn example() -> Result<(), lattice_client::ClientError> {
//! let config = ClientConfig::for_environment(Environment::Production)
//!     .with_auth_token("...")?;
//! let client = LatticeClient::new(config);
//! let orgs = organizations_api::get_all_organizations(&client).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod access_check;
mod errors;
mod fqn;
mod grant;
mod http;
mod model;
mod organization;
mod permission;
mod principal;
mod validate;

/// The authorization API: bulk permission checks.
pub mod authorization_api;

/// The entity-data API: reads and writes addressed by fully qualified names.
pub mod data_api;

/// The organizations API: organizations, principals, roles, members, email
/// domains, and role grants.
pub mod organizations_api;

pub use access_check::{
    AccessCheck, AccessCheckBuilder, is_valid_access_check, is_valid_access_check_slice,
};
pub use authorization_api::Authorization;
pub use data_api::{CreateEntityRequest, FileType};
pub use errors::{ClientError, ModelError};
pub use fqn::{FullyQualifiedName, is_valid_fqn, is_valid_fqn_slice};
pub use grant::{Grant, GrantBuilder, GrantType, is_valid_grant};
pub use http::{ApiName, ClientConfig, Environment, LatticeClient};
pub use model::{Model, ModelBuilder, is_valid_model};
pub use organization::{Organization, OrganizationBuilder, is_valid_organization};
pub use permission::PermissionType;
pub use principal::{
    Principal, PrincipalBuilder, PrincipalType, is_valid_principal, is_valid_principal_slice,
};
pub use validate::{
    is_non_empty_string, is_non_empty_string_slice, is_valid_uuid, is_valid_uuid_slice,
    validate_non_empty_slice,
};
