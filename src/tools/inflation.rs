use super::{tool::ToolFuture, NinjaClient, Tool};
use crate::{
    schemas::{decode_params, parameters_schema},
    types::InflationRequest,
};

/// Latest inflation figures for a country
#[derive(Debug, Clone)]
pub struct InflationTool {
    client: NinjaClient,
}

impl InflationTool {
    pub fn new(client: NinjaClient) -> Self {
        Self { client }
    }
}

impl Tool for InflationTool {
    fn name(&self) -> &'static str {
        "get_inflation_data"
    }

    fn description(&self) -> &'static str {
        "Get the latest inflation data for a specific country"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<InflationRequest>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let request: InflationRequest = decode_params(self.name(), parameters)?;
            let response = self.client.inflation(&request).await?;
            Ok(serde_json::to_value(response)?)
        })
    }
}
