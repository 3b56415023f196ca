use schemars::JsonSchema;
use serde_json::{json, Value};
use std::any::type_name;

/// JSON Schema describing a tool's parameters, as sent in the OpenAI `tools` array.
///
/// Doc comments on the fields of `T` become property descriptions.
pub fn parameters_schema<T: JsonSchema>() -> Value {
    let root = schemars::schema_for!(T);
    serde_json::to_value(&root.schema).unwrap_or_else(|err| {
        tracing::warn!(
            "failed to serialize parameter schema for {}: {}",
            type_name::<T>(),
            err
        );
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    })
}
