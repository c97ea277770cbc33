//! Workflow AI: a task service with one-shot AI summaries.
//!
//! Tasks carry a title, an optional description and, once analyzed, an
//! AI-generated summary that can never be replaced.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, summarization and
//!   notifications
//! - **Adapters**: In-memory, `PostgreSQL`, Gemini and webhook
//!   implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle and the analysis state machine
//! - [`api`]: HTTP routes over the lifecycle service
//! - [`config`]: Server configuration
//! - [`telemetry`]: Tracing setup

pub mod api;
pub mod config;
pub mod task;
pub mod telemetry;
