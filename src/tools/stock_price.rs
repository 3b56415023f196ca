use super::{tool::ToolFuture, NinjaClient, Tool};
use crate::{
    schemas::{decode_params, parameters_schema},
    types::StockPriceRequest,
};

#[derive(Debug, Clone)]
pub struct StockPriceTool {
    client: NinjaClient,
}

impl StockPriceTool {
    pub fn new(client: NinjaClient) -> Self {
        Self { client }
    }
}

impl Tool for StockPriceTool {
    fn name(&self) -> &'static str {
        "stock_price"
    }

    fn description(&self) -> &'static str {
        "Get the current stock price for a given ticker symbol"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        parameters_schema::<StockPriceRequest>()
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let request: StockPriceRequest = decode_params(self.name(), parameters)?;
            let response = self.client.stock_price(&request).await?;
            Ok(serde_json::to_value(response)?)
        })
    }
}
