use crate::{
    core::agent::Agent,
    error::{AgentError, Result},
    services::{
        openai_client::ChatCompletionRequest,
        tool_call_utils::{
            extract_arguments_str, extract_function_info, extract_tool_call_id,
            parse_function_arguments, requested_tool_calls,
        },
    },
};
use serde_json::{json, Value};
use tokio::time::timeout;
use tracing::{debug, warn};

fn tool_message(tool_call_id: &str, content: String) -> Value {
    json!({
        "role": "tool",
        "tool_call_id": tool_call_id,
        "content": content
    })
}

impl Agent {
    /// Drive the conversation until the model answers without requesting tools.
    ///
    /// Tool failures are handed back to the model as error payloads; only
    /// failures of the model round trip itself end the run.
    pub async fn run_with_messages(&self, mut messages: Vec<Value>) -> Result<String> {
        let tools = self.function_factory().get_openai_tools();

        for iteration in 1..=self.max_iterations() {
            let mut chat_request =
                ChatCompletionRequest::new(self.model().to_owned(), messages.clone())
                    .with_max_tokens(self.max_tokens());

            if !tools.is_empty() {
                chat_request = chat_request
                    .with_tools(tools.clone())
                    .with_tool_choice(json!("auto"));
            }

            let request_body = chat_request.into_value();

            let response = timeout(self.timeout(), self.make_raw_request(&request_body))
                .await
                .map_err(|_| AgentError::Timeout("OpenAI API call timed out".to_string()))??;

            let assistant_message = response
                .get("choices")
                .and_then(|value| value.as_array())
                .and_then(|choices| choices.first())
                .and_then(|choice| choice.get("message"))
                .cloned()
                .ok_or(AgentError::EmptyResponse)?;

            let Some(tool_calls) = requested_tool_calls(&assistant_message) else {
                let answer = assistant_message
                    .get("content")
                    .and_then(|value| value.as_str())
                    .unwrap_or("");

                if answer.trim().is_empty() {
                    return Err(AgentError::EmptyResponse);
                }

                debug!(iteration, "model produced final answer");
                return Ok(answer.to_string());
            };

            debug!(iteration, calls = tool_calls.len(), "model requested tools");

            messages.push(json!({
                "role": "assistant",
                "content": assistant_message.get("content").cloned().unwrap_or(Value::Null),
                "tool_calls": tool_calls
            }));

            for tool_call in tool_calls {
                let tool_call_id = extract_tool_call_id(tool_call);

                let Some((function, Some(function_name))) = extract_function_info(tool_call)
                    .filter(|(_, name)| name.is_some_and(|name| !name.is_empty()))
                else {
                    messages.push(tool_message(
                        tool_call_id,
                        AgentError::InvalidFunctionCall(
                            "Tool call missing function name".to_string(),
                        )
                        .to_error_payload()
                        .to_string(),
                    ));
                    continue;
                };

                let result = match parse_function_arguments(
                    extract_arguments_str(function),
                    function_name,
                ) {
                    Ok(arguments_json) => match self
                        .function_factory()
                        .execute_function(function_name, arguments_json)
                        .await
                    {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(tool = function_name, "tool call failed: {}", e);
                            e.to_error_payload()
                        }
                    },
                    Err(error) => error.to_error_payload(),
                };

                messages.push(tool_message(tool_call_id, result.to_string()));
            }
        }

        Err(AgentError::MaxIterations(self.max_iterations()))
    }
}
