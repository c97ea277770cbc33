//! Task lifecycle management.
//!
//! Tasks are created, edited and deleted through a single service that also
//! owns the one-way AI analysis transition: a task with a description may be
//! summarized exactly once, and the summary never changes afterwards. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
