//! Forwarding module for pushing user IDs to the script endpoint.
//!
//! This module provides:
//! - The outbound payload and result types
//! - An HTTP forwarder that performs a single POST per user ID
//!
//! ## Flow
//!
//! ```text
//! user ID → ForwardPayload → POST <forward_url> → ForwardResult
//! ```

pub mod forwarder;
pub mod types;

pub use forwarder::{Forward, Forwarder};
pub use types::{ForwardError, ForwardPayload, ForwardResult, FORWARD_ACTION};
