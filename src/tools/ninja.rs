//! REST client for the API Ninjas financial endpoints.
//!
//! Each operation is a single GET with the API key in the `X-Api-Key`
//! header. Transport, status and decode failures are wrapped with a
//! per-operation prefix; an empty or `null` body is reported as missing data.

use crate::{
    types::{
        CurrencyConversionRequest, CurrencyConversionResponse, InflationRequest,
        InflationResponse, StockPriceRequest, StockPriceResponse,
    },
    AgentError, Result,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com/v1";
const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Clone)]
pub struct NinjaClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl fmt::Debug for NinjaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NinjaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl NinjaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn inflation(&self, request: &InflationRequest) -> Result<InflationResponse> {
        info!(
            "Invoking ninja api to get inflation data for country: {} and type: {}",
            request.country, request.inflation_type
        );

        let responses: Option<Vec<InflationResponse>> = self
            .get(
                "inflation",
                &[
                    ("country", request.country.as_str()),
                    ("type", request.inflation_type.as_str()),
                ],
            )
            .await
            .map_err(|err| {
                error!("Error while calling Ninja API: {}", err);
                AgentError::ToolExecution(format!("Error while fetching inflation data: {}", err))
            })?;

        responses
            .and_then(|responses| responses.into_iter().next())
            .ok_or_else(|| {
                AgentError::NoData(
                    "No inflation data found for the given country and type".to_string(),
                )
            })
    }

    pub async fn exchange_rate(
        &self,
        request: &CurrencyConversionRequest,
    ) -> Result<CurrencyConversionResponse> {
        info!(
            "Invoking ninja api to convert currency from: {} to: {}",
            request.from, request.to
        );

        let pair = request.pair();
        let response: Option<CurrencyConversionResponse> = self
            .get("exchangerate", &[("pair", pair.as_str())])
            .await
            .map_err(|err| {
                error!(
                    "Error while calling Ninja API for currency conversion: {}",
                    err
                );
                AgentError::ToolExecution(format!("Error while converting currency: {}", err))
            })?;

        response.ok_or_else(|| {
            AgentError::NoData("No currency conversion data found for the given pair".to_string())
        })
    }

    pub async fn stock_price(&self, request: &StockPriceRequest) -> Result<StockPriceResponse> {
        info!(
            "Invoking ninja api to get stock price for ticker: {}",
            request.symbol
        );

        let response: Option<StockPriceResponse> = self
            .get("stockprice", &[("ticker", request.symbol.as_str())])
            .await
            .map_err(|err| {
                error!("Error while calling Ninja API for stock price: {}", err);
                AgentError::ToolExecution(format!("Error while fetching stock price: {}", err))
            })?;

        response.ok_or_else(|| {
            AgentError::NoData(format!(
                "No stock price data found for ticker: {}",
                request.symbol
            ))
        })
    }

    /// GET `{base_url}/{path}`; `Ok(None)` when the body is empty or `null`
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Option<T>, String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|err| format!("request failed: {err}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| format!("failed to read response: {err}"))?;

        if !status.is_success() {
            return Err(format!("HTTP {} returned: {}", status, body.trim()));
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<T>>(&body).map_err(|err| format!("invalid JSON: {err}"))
    }
}
