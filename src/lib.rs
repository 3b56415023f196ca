//! ninja-agent-rs: an LLM chat service for quick finance questions
//!
//! The model is given three tools backed by the API Ninjas REST API
//! (inflation, currency exchange rates and stock prices) and answers each
//! question with a single descriptive sentence.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ninja_agent_rs::{Agent, FunctionFactory, NinjaClient, Question};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let ninjas = NinjaClient::new(std::env::var("NINJAS_API_KEY")?);
//!     let agent = Agent::new(api_key, FunctionFactory::with_ninja_tools(ninjas));
//!
//!     let answer = agent.answer(&Question::new("What is AAPL trading at?")).await?;
//!     println!("{}", answer.answer);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub(crate) mod services;
pub mod tools;
pub mod types;

pub use config::Settings;
pub use core::Agent;
pub use error::{AgentError, Result};
pub use schemas::Validator;
pub use tools::{FunctionFactory, NinjaClient, Tool};
pub use types::{Answer, Question};

#[cfg(feature = "cli")]
pub mod cli;
