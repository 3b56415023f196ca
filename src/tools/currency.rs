use super::{tool::ToolFuture, NinjaClient, Tool};
use crate::{
    schemas::{decode_params, parameters_schema},
    types::CurrencyConversionRequest,
};

/// Exchange rate between two currencies
#[derive(Debug, Clone)]
pub struct CurrencyTool {
    client: NinjaClient,
}

impl CurrencyTool {
    pub fn new(client: NinjaClient) -> Self {
        Self { client }
    }
}

impl Tool for CurrencyTool {
    fn name(&self) -> &'static str {
        "convert_currency"
    }

    fn description(&self) -> &'static str {
        "Convert currency from one to another"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<CurrencyConversionRequest>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let request: CurrencyConversionRequest = decode_params(self.name(), parameters)?;
            let response = self.client.exchange_rate(&request).await?;
            Ok(serde_json::to_value(response)?)
        })
    }
}
