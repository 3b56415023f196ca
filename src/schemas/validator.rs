use super::validation::validate_against_schema;
use crate::{tools::Tool, AgentError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Validation strategies for tool arguments produced by the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validator {
    /// Rely on serde decoding inside the tool
    SerdeFirst,
    /// Check arguments against the tool's JSON Schema before dispatch
    #[default]
    Strict,
}

impl Validator {
    /// Check arguments for `tool` before it is executed
    pub fn check(&self, tool: &dyn Tool, params: &Value) -> Result<()> {
        match self {
            Validator::SerdeFirst => Ok(()),
            Validator::Strict => {
                validate_against_schema(tool.name(), &tool.parameters_schema(), params)
            }
        }
    }
}

/// Decode tool arguments, reporting the path of the first offending field
pub fn decode_params<T: DeserializeOwned>(tool_name: &str, params: Value) -> Result<T> {
    serde_path_to_error::deserialize(params).map_err(|e| {
        let path = e.path().to_string();
        AgentError::Validation(format!(
            "Invalid parameters for {} at {}: {}",
            tool_name,
            if path == "." { "<root>".to_string() } else { path },
            e.inner()
        ))
    })
}
