//! The generic model template: an immutable value object holding a single
//! UUID identifier, built through a validating builder. Concrete models in
//! this crate follow the same shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ModelError;

////////////////////////////////////////////// Model //////////////////////////////////////////////

/// An immutable value object identified by a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Model {
    /// The model's unique identifier.
    pub id: Uuid,
}

impl Model {
    /// Re-runs the builder against this instance's fields.
    pub fn validate(&self) -> Result<(), ModelError> {
        ModelBuilder::new().id(&self.id.to_string())?.build()?;
        Ok(())
    }
}

////////////////////////////////////////// ModelBuilder ///////////////////////////////////////////

/// Accumulates validated fields and produces a [`Model`].
///
/// Setters consume the builder and fail fast on invalid input; `build`
/// borrows, so one builder can produce any number of structurally equal
/// instances.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    id: Option<Uuid>,
}

impl ModelBuilder {
    /// Creates an unconfigured builder.
    pub fn new() -> Self {
        ModelBuilder::default()
    }

    /// Sets the id from its string form.
    pub fn id(mut self, id: &str) -> Result<Self, ModelError> {
        let id = Uuid::try_parse(id).map_err(|_| ModelError::invalid("id", "must be a valid UUID"))?;
        self.id = Some(id);
        Ok(self)
    }

    /// Checks that all required fields were set and produces the model.
    pub fn build(&self) -> Result<Model, ModelError> {
        let id = self.id.ok_or(ModelError::MissingProperty("id"))?;
        Ok(Model { id })
    }
}

//////////////////////////////////////////// Validity /////////////////////////////////////////////

#[derive(Deserialize)]
struct ModelCandidate {
    id: Option<String>,
}

pub(crate) fn model_from_value(value: &Value) -> Result<Model, ModelError> {
    let candidate: ModelCandidate = serde_json::from_value(value.clone())
        .map_err(|_| ModelError::invalid("model", "must be an object"))?;
    let mut builder = ModelBuilder::new();
    if let Some(id) = &candidate.id {
        builder = builder.id(id)?;
    }
    builder.build()
}

/// Returns true iff the value would survive [`ModelBuilder`] construction.
pub fn is_valid_model(value: &Value) -> bool {
    match model_from_value(value) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "invalid model");
            false
        }
    }
}
