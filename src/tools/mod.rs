//! Tools module containing the tool abstraction and the API Ninjas tools

pub mod currency;
pub mod function_factory;
pub mod inflation;
pub mod ninja;
pub mod stock_price;
pub mod tool;

pub use currency::CurrencyTool;
pub use function_factory::FunctionFactory;
pub use inflation::InflationTool;
pub use ninja::NinjaClient;
pub use stock_price::StockPriceTool;
pub use tool::{Tool, ToolFuture, ToolRegistry};
