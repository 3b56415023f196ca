pub(crate) mod execution;
pub(crate) mod openai_client;
pub(crate) mod tool_call_utils;
