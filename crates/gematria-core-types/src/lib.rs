//! Core types shared across the gematria crates
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation**: RequestId attached to HTTP requests and errors
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
