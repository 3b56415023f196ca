use crate::{
    config::Settings,
    error::Result,
    services::openai_client::OpenAIClient,
    tools::FunctionFactory,
    types::{Answer, Question},
};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Chat agent answering questions with the help of registered tools
#[derive(Debug)]
pub struct Agent {
    openai_client: OpenAIClient,
    function_factory: FunctionFactory,
    model: String,
    max_iterations: usize,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl Agent {
    pub fn new(api_key: String, function_factory: FunctionFactory) -> Self {
        Self {
            openai_client: OpenAIClient::new(api_key),
            function_factory,
            model: DEFAULT_MODEL.to_string(),
            max_iterations: 10,
            max_tokens: None,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai_client.set_base_url(base_url);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.openai_client.set_max_retries(max_retries);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn function_factory(&self) -> &FunctionFactory {
        &self.function_factory
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Answer a question in one sentence, calling tools as the model asks
    pub async fn answer(&self, question: &Question) -> Result<Answer> {
        let messages = vec![json!({
            "role": "user",
            "content": question.to_prompt()
        })];

        self.run_with_messages(messages).await.map(Answer::new)
    }

    pub async fn run(&self, prompt: &str) -> Result<String> {
        self.answer(&Question::new(prompt))
            .await
            .map(|answer| answer.answer)
    }

    pub(crate) async fn make_raw_request(&self, request_body: &Value) -> Result<Value> {
        self.openai_client
            .chat_completion(request_body, self.timeout)
            .await
    }

    /// Agent wired with the API Ninjas tools, configured from the environment
    pub fn from_env() -> Result<Self> {
        Settings::from_env().map(|settings| settings.build_agent())
    }
}
