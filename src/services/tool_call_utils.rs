use crate::error::AgentError;
use serde_json::Value;

/// Extract tool_call_id from a tool call JSON object
pub(super) fn extract_tool_call_id(tool_call: &Value) -> &str {
    tool_call
        .get("id")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
}

/// Extract function name from a tool call JSON object
pub(super) fn extract_function_info(tool_call: &Value) -> Option<(&Value, Option<&str>)> {
    let function = tool_call.get("function")?;
    let function_name = function.get("name").and_then(|value| value.as_str());
    Some((function, function_name))
}

/// Parse function arguments from JSON string; empty arguments mean `{}`
pub(super) fn parse_function_arguments(
    arguments_str: &str,
    function_name: &str,
) -> Result<Value, AgentError> {
    if arguments_str.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_str(arguments_str).map_err(|err| {
        AgentError::InvalidFunctionCall(format!(
            "Failed to parse arguments for tool '{}': {}",
            function_name, err
        ))
    })
}

/// Extract arguments string from function object
pub(super) fn extract_arguments_str(function: &Value) -> &str {
    function
        .get("arguments")
        .and_then(|value| value.as_str())
        .unwrap_or("")
}

/// Tool calls requested by an assistant message, if any
pub(super) fn requested_tool_calls(assistant_message: &Value) -> Option<&Vec<Value>> {
    assistant_message
        .get("tool_calls")
        .and_then(|value| value.as_array())
        .filter(|calls| !calls.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_call_parts() {
        let call = json!({
            "id": "call_1",
            "type": "function",
            "function": {"name": "stock_price", "arguments": "{\"symbol\":\"AAPL\"}"}
        });

        assert_eq!(extract_tool_call_id(&call), "call_1");
        let (function, name) = extract_function_info(&call).unwrap();
        assert_eq!(name, Some("stock_price"));
        let args = parse_function_arguments(extract_arguments_str(function), "stock_price").unwrap();
        assert_eq!(args, json!({"symbol": "AAPL"}));
    }

    #[test]
    fn malformed_arguments_are_invalid_calls() {
        let err = parse_function_arguments("{not json", "stock_price").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FUNCTION_CALL");
    }

    #[test]
    fn null_or_empty_tool_calls_are_ignored() {
        assert!(requested_tool_calls(&json!({"content": "hi", "tool_calls": null})).is_none());
        assert!(requested_tool_calls(&json!({"content": "hi", "tool_calls": []})).is_none());
        assert!(requested_tool_calls(&json!({"content": "hi"})).is_none());
    }
}
