//! Adapter implementations for task lifecycle ports.

pub mod gemini;
pub mod memory;
pub mod postgres;
pub mod webhook;
