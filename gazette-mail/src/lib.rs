#![deny(missing_docs)]
//! Briefing rendering and email dispatch.
//!
//! [`render`] turns a validated payload into a self-contained HTML digest;
//! [`RelayClient`] hands that digest to a transactional-email relay. A
//! failed dispatch loses nothing — the payload is already rendered and
//! displayed, only the send is retried.

mod relay;
mod render;

pub use relay::{DEFAULT_SENDER, DispatchReceipt, RelayClient, parse_recipients};
pub use render::{render, subject_for};
