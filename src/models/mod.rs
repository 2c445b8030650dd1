pub mod agent;
pub mod execution;
pub mod executions;
pub mod state;

use crate::errors::ModelError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;

/// Shared contract of every Bacalhau API model.
///
/// Wire keys live in the serde `rename` attributes of each model and are mirrored in
/// `ATTRIBUTE_MAP`, so the mapping from Rust field name to JSON key can be inspected without
/// serializing anything.
pub trait ApiModel: Serialize + DeserializeOwned + PartialEq + Sized + 'static {
    /// Name of the model as declared by the API schema
    const MODEL_NAME: &'static str;

    /// Pairs of (Rust field name, JSON wire key)
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)];

    /// Returns the wire key of a Rust field, if the model declares it.
    fn wire_key(attribute: &str) -> Option<&'static str> {
        Self::ATTRIBUTE_MAP
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, key)| *key)
    }

    /// Converts the model into its canonical mapping, keyed by wire names.
    ///
    /// Absent fields are left out of the mapping, nested models and lists are converted
    /// recursively.
    fn to_map(&self) -> Result<Map<String, Value>, ModelError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ModelError::NotAnObject {
                model: Self::MODEL_NAME,
                found: json_type_name(&other),
            }),
            Err(source) => Err(ModelError::TypeMismatch {
                model: Self::MODEL_NAME,
                source,
            }),
        }
    }

    /// Rebuilds the model from a canonical mapping.
    ///
    /// # Arguments
    ///
    /// * `map` - JSON object keyed by wire names
    fn from_map(map: Map<String, Value>) -> Result<Self, ModelError> {
        serde_json::from_value(Value::Object(map)).map_err(|source| ModelError::TypeMismatch {
            model: Self::MODEL_NAME,
            source,
        })
    }

    /// Pretty-printed canonical mapping. Keys are sorted, so the output is stable.
    fn to_pretty_string(&self) -> Result<String, ModelError> {
        let map = self.to_map()?;
        serde_json::to_string_pretty(&map).map_err(|source| ModelError::TypeMismatch {
            model: Self::MODEL_NAME,
            source,
        })
    }

    /// Compares against a value of any type. Values of another model type are never equal.
    fn same_model(&self, other: &dyn Any) -> bool {
        match other.downcast_ref::<Self>() {
            Some(other) => self == other,
            None => false,
        }
    }
}

/// Writes the pretty-printed canonical mapping of a model, used by the `Display` impls.
///
/// A model that cannot be converted is rendered as the conversion error.
pub(crate) fn fmt_model<M: ApiModel>(model: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match model.to_pretty_string() {
        Ok(rendered) => f.write_str(&rendered),
        Err(err) => write!(f, "<{}>", err),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
