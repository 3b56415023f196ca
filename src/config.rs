//! Runtime settings resolved from the environment.
//!
//! Values come from a key lookup so callers can layer `.env`, the process
//! environment and command-line overrides in whatever order they need.

use crate::{
    core::{Agent, DEFAULT_MODEL},
    services::openai_client::{DEFAULT_BASE_URL as OPENAI_BASE_URL, DEFAULT_MAX_RETRIES},
    tools::{ninja::DEFAULT_BASE_URL as NINJAS_BASE_URL, FunctionFactory, NinjaClient},
    AgentError, Result,
};
use std::{str::FromStr, time::Duration};

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

#[derive(Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub ninjas_api_key: String,
    pub ninjas_base_url: String,
    pub server_addr: String,
    pub timeout: Duration,
    pub max_iterations: usize,
    pub max_retries: usize,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("ninjas_base_url", &self.ninjas_base_url)
            .field("server_addr", &self.server_addr)
            .field("timeout", &self.timeout)
            .field("max_iterations", &self.max_iterations)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, applying defaults for optional keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").ok_or_else(|| {
            AgentError::Config(
                "OpenAI API key is required. Set OPENAI_API_KEY or use --api-key".to_string(),
            )
        })?;
        let ninjas_api_key = get("NINJAS_API_KEY").ok_or_else(|| {
            AgentError::Config("API Ninjas key is required. Set NINJAS_API_KEY".to_string())
        })?;

        Ok(Self {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ninjas_api_key,
            ninjas_base_url: get("NINJAS_BASE_URL").unwrap_or_else(|| NINJAS_BASE_URL.to_string()),
            server_addr: get("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_iterations: parse_or(
                "MAX_ITERATIONS",
                get("MAX_ITERATIONS"),
                DEFAULT_MAX_ITERATIONS,
            )?,
            max_retries: parse_or("MAX_RETRIES", get("MAX_RETRIES"), DEFAULT_MAX_RETRIES)?,
        })
    }

    pub fn ninja_client(&self) -> NinjaClient {
        NinjaClient::new(self.ninjas_api_key.clone()).with_base_url(self.ninjas_base_url.clone())
    }

    /// Build an agent carrying the API Ninjas tools
    pub fn build_agent(&self) -> Agent {
        Agent::new(
            self.openai_api_key.clone(),
            FunctionFactory::with_ninja_tools(self.ninja_client()),
        )
        .with_model(self.model.clone())
        .with_base_url(self.openai_base_url.clone())
        .with_timeout(self.timeout)
        .with_max_iterations(self.max_iterations)
        .with_max_retries(self.max_retries)
    }
}

/// Parse an optional setting, falling back to `default` when absent
pub(crate) fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|err| AgentError::Config(format!("Invalid {key} value `{value}`: {err}"))),
        None => Ok(default),
    }
}
