#![deny(missing_docs)]
//! Gemini provider for gazette.
//!
//! Implements [`gazette_types::Provider`] against the `generateContent`
//! wire format: `contents`/`parts` requests, `candidates` responses (plus
//! the bare `{text}` shape some gateways answer with), `responseSchema`
//! structured output, and the `google_search` grounding tool.

mod client;
mod error;
mod mapping;
mod models;

pub use client::Gemini;
