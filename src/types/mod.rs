pub mod chat;
pub mod ninja;

pub use chat::{Answer, Question};
pub use ninja::{
    CurrencyConversionRequest, CurrencyConversionResponse, InflationRequest, InflationResponse,
    StockPriceRequest, StockPriceResponse,
};
