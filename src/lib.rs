//! Client library for the Bacalhau orchestrator API.
//!
//! `models` holds the wire models of the API together with the `ApiModel` contract they share,
//! `client` the HTTP transport, and `agent` / `executions` one function per endpoint.

pub mod agent;
pub mod client;
pub mod config;
pub mod errors;
pub mod executions;
pub mod models;

pub use client::BacalhauClient;
pub use config::BacalhauConfig;
pub use errors::{Error, Result};
