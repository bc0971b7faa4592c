// Core grading pipeline:
// - Gemini API client and request/response data structures
// - Prompt builder for the ENEM correction rubric
// - Configuration loading
// - Shared error types

pub mod client;
pub use client::*;

pub mod types;
pub use types::*;

pub mod prompt;
pub use prompt::*;

pub mod config;
pub use config::*;

pub mod errors;
pub use errors::*;
