//! In-memory adapters for local runs and tests.

mod summarizer;
mod task;

pub use summarizer::ScriptedSummarizer;
pub use task::InMemoryTaskRepository;
