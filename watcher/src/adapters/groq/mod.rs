//! Groq adapter
//!
//! Assessment service backed by an OpenAI-compatible chat completions API.

pub mod client;

pub use client::GroqAssessmentClient;
