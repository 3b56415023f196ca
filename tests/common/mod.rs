#![allow(dead_code)]

use ninja_agent_rs::{Agent, FunctionFactory, NinjaClient};
use serde_json::{json, Value};

pub const NINJAS_KEY: &str = "test-ninjas-key";

pub fn ninja_client(server: &mockito::Server) -> NinjaClient {
    NinjaClient::new(NINJAS_KEY).with_base_url(server.url())
}

/// Agent whose model and tools both point at the mock server
pub fn agent(server: &mockito::Server) -> Agent {
    Agent::new(
        "test-openai-key".to_string(),
        FunctionFactory::with_ninja_tools(ninja_client(server)),
    )
    .with_base_url(server.url())
    .with_max_retries(0)
}

pub fn tool_call_completion(id: &str, name: &str, arguments: Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": id,
                    "type": "function",
                    "function": {
                        "name": name,
                        "arguments": arguments.to_string()
                    }
                }]
            }
        }]
    })
    .to_string()
}

pub fn text_completion(content: Option<&str>) -> String {
    json!({
        "id": "chatcmpl-2",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {
                "role": "assistant",
                "content": content
            }
        }]
    })
    .to_string()
}
