use super::{tool::ToolRegistry, CurrencyTool, InflationTool, NinjaClient, StockPriceTool, Tool};
use crate::{schemas::Validator, AgentError, Result};
use serde_json::Value;
use tracing::debug;

/// Factory for creating and managing function/tool execution
#[derive(Debug, Default)]
pub struct FunctionFactory {
    registry: ToolRegistry,
    validator: Validator,
}

impl FunctionFactory {
    /// Create a new function factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with the inflation, currency and stock price tools sharing one client
    pub fn with_ninja_tools(client: NinjaClient) -> Self {
        let mut factory = Self::new();
        factory.register_tool(InflationTool::new(client.clone()));
        factory.register_tool(CurrencyTool::new(client.clone()));
        factory.register_tool(StockPriceTool::new(client));
        factory
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Register a tool with the factory
    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.registry.register(tool);
    }

    /// Execute a function call by name
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| AgentError::ToolNotFound(function_name.to_string()))?;

        self.validator.check(tool, &parameters)?;
        debug!(tool = function_name, %parameters, "executing tool");

        tool.execute(parameters).await
    }

    /// Get all available tools for OpenAI function calling
    pub fn get_openai_tools(&self) -> Vec<Value> {
        self.registry.to_openai_tools()
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }

    /// Names of all registered tools, sorted
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.list().iter().map(|tool| tool.name()).collect()
    }
}
