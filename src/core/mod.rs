pub mod agent;

pub use agent::{Agent, DEFAULT_MODEL};
