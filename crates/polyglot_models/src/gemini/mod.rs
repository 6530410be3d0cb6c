//! Google Generative Language API support.
//!
//! The same endpoint serves both the Gemini and the Gemma model families, so a
//! single adapter covers every model in the default fallback order.

mod client;

pub use client::GeminiGenerator;
