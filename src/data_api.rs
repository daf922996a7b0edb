//! The entity-data API: reading and writing data against an existing entity
//! data model, addressed by fully qualified names.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ClientError, ModelError};
use crate::fqn::{FullyQualifiedName, is_valid_fqn_slice};
use crate::http::{ApiName, LatticeClient};
use crate::validate::is_non_empty_string;

const ENTITY_DATA_PATH: &str = "entitydata";
const MULTIPLE_PATH: &str = "multiple";
const SELECTED_PATH: &str = "selected";
const FILE_TYPE_PARAM: &str = "fileType";

fn reject(message: &str) -> ClientError {
    ClientError::InvalidParameter(message.to_string())
}

////////////////////////////////////////////// FileType ///////////////////////////////////////////

/// Download formats accepted by the file-URL endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Comma-separated values.
    Csv,
    /// JSON.
    Json,
}

impl FileType {
    /// The query-parameter value for this file type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Json => "json",
        }
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ModelError;

    /// Accepts both cases, matching the server's lookup table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" | "CSV" => Ok(FileType::Csv),
            "json" | "JSON" => Ok(FileType::Json),
            _ => Err(ModelError::invalid(
                "fileType",
                "must be a valid file type string",
            )),
        }
    }
}

/////////////////////////////////////// CreateEntityRequest ///////////////////////////////////////

/// The body of the entity-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntityRequest {
    /// The entity type the new entities belong to.
    #[serde(rename = "type")]
    pub entity_type: FullyQualifiedName,
    /// The entity set to write into.
    pub entity_set_name: String,
    /// One property map per entity to create.
    pub properties: Vec<Map<String, Value>>,
}

impl CreateEntityRequest {
    /// Checks the request's structural invariants.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.entity_type.validate()?;
        if !is_non_empty_string(&self.entity_set_name) {
            return Err(ModelError::invalid(
                "entitySetName",
                "must be a non-empty string",
            ));
        }
        if self.properties.is_empty() {
            return Err(ModelError::invalid(
                "properties",
                "must be a non-empty array of property maps",
            ));
        }
        Ok(())
    }
}

////////////////////////////////////////////// Reads //////////////////////////////////////////////

/// `GET /entitydata/{namespace}/{name}`
///
/// Gets all entity data for the given entity type.
pub async fn get_all_entities_of_type(
    client: &LatticeClient,
    entity_type_fqn: &FullyQualifiedName,
) -> Result<Vec<Map<String, Value>>, ClientError> {
    entity_type_fqn.validate()?;
    let path = format!(
        "{}/{}/{}",
        ENTITY_DATA_PATH, entity_type_fqn.namespace, entity_type_fqn.name
    );
    client.get(ApiName::Data, &path).await
}

/// Returns the URL for a direct file download of all entity data for the
/// given entity type.
pub fn get_all_entities_of_type_file_url(
    client: &LatticeClient,
    entity_type_fqn: &FullyQualifiedName,
    file_type: FileType,
) -> Result<String, ClientError> {
    entity_type_fqn.validate()?;
    let path = format!(
        "{}/{}/{}",
        ENTITY_DATA_PATH, entity_type_fqn.namespace, entity_type_fqn.name
    );
    Ok(format!(
        "{}?{}={}",
        client.url_for(ApiName::Data, &path),
        FILE_TYPE_PARAM,
        file_type
    ))
}

/// `GET /entitydata/{namespace}/{name}/{entitySetName}`
///
/// Gets all entity data in the given entity set for the given entity type.
pub async fn get_all_entities_of_type_in_set(
    client: &LatticeClient,
    entity_type_fqn: &FullyQualifiedName,
    entity_set_name: &str,
) -> Result<Vec<Map<String, Value>>, ClientError> {
    entity_type_fqn.validate()?;
    if !is_non_empty_string(entity_set_name) {
        return Err(reject("entitySetName must be a non-empty string"));
    }
    let path = format!(
        "{}/{}/{}/{}",
        ENTITY_DATA_PATH, entity_type_fqn.namespace, entity_type_fqn.name, entity_set_name
    );
    client.get(ApiName::Data, &path).await
}

/// Returns the URL for a direct file download of all entity data in the
/// given entity set for the given entity type.
pub fn get_all_entities_of_type_in_set_file_url(
    client: &LatticeClient,
    entity_type_fqn: &FullyQualifiedName,
    entity_set_name: &str,
    file_type: FileType,
) -> Result<String, ClientError> {
    entity_type_fqn.validate()?;
    if !is_non_empty_string(entity_set_name) {
        return Err(reject("entitySetName must be a non-empty string"));
    }
    let path = format!(
        "{}/{}/{}/{}",
        ENTITY_DATA_PATH, entity_type_fqn.namespace, entity_type_fqn.name, entity_set_name
    );
    Ok(format!(
        "{}?{}={}",
        client.url_for(ApiName::Data, &path),
        FILE_TYPE_PARAM,
        file_type
    ))
}

/// `PUT /entitydata/{namespace}/{name}/{entitySetName}/selected`
///
/// Gets entity data in the given entity set, filtered to the given property
/// types.
pub async fn get_selected_entities_of_type_in_set(
    client: &LatticeClient,
    entity_type_fqn: &FullyQualifiedName,
    entity_set_name: &str,
    property_type_fqns: &[FullyQualifiedName],
) -> Result<Vec<Map<String, Value>>, ClientError> {
    entity_type_fqn.validate()?;
    if !is_non_empty_string(entity_set_name) {
        return Err(reject("entitySetName must be a non-empty string"));
    }
    if !is_valid_fqn_slice(property_type_fqns) {
        return Err(reject(
            "propertyTypeFqns must be a non-empty array of valid FQNs",
        ));
    }
    let path = format!(
        "{}/{}/{}/{}/{}",
        ENTITY_DATA_PATH,
        entity_type_fqn.namespace,
        entity_type_fqn.name,
        entity_set_name,
        SELECTED_PATH
    );
    client.put(ApiName::Data, &path, &property_type_fqns).await
}

/// `PUT /entitydata/multiple`
///
/// Gets all entity data for each of the given entity types.
pub async fn get_all_entities_of_types(
    client: &LatticeClient,
    entity_type_fqns: &[FullyQualifiedName],
) -> Result<Vec<Vec<Map<String, Value>>>, ClientError> {
    if !is_valid_fqn_slice(entity_type_fqns) {
        return Err(reject(
            "entityTypeFqns must be a non-empty array of valid FQNs",
        ));
    }
    let path = format!("{}/{}", ENTITY_DATA_PATH, MULTIPLE_PATH);
    client.put(ApiName::Data, &path, &entity_type_fqns).await
}

////////////////////////////////////////////// Writes /////////////////////////////////////////////

/// `POST /entitydata`
///
/// Creates entries for the given entity data.
pub async fn create_entity(
    client: &LatticeClient,
    request: &CreateEntityRequest,
) -> Result<(), ClientError> {
    request.validate()?;
    client
        .post_no_content(ApiName::Data, ENTITY_DATA_PATH, request)
        .await
}
