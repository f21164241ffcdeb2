#![deny(missing_docs)]
//! OpenAI-compatible gateway provider for gazette.
//!
//! Implements [`gazette_types::Provider`] against the Chat Completions wire
//! format used by OpenAI itself and by the many compatible gateways users
//! point the dashboard at. Listing-shape differences between gateways are
//! normalized in [`models`]; a wrong base URL that serves a dashboard page
//! instead of an API root is detected and reported distinctly.

mod client;
mod error;
mod mapping;
mod models;

pub use client::OpenAiCompatible;
pub use models::normalize_model_list;
