//! Gematria Core - phrase normalization, valuation and bulk reconciliation
//!
//! This crate provides:
//! - The standard (Mispar Hechrechi) letter table, normalizer and calculator
//! - Word extraction helpers for importers
//! - The `Entry` model and the `EntryStore` persistence seam
//! - An in-memory `EntryStore`
//! - The bulk upsert reconciler
//! - Error and logging facilities shared by every other crate

pub mod errors;
pub mod gematria;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod reconcile;

/// Re-exported so the logging macros resolve schema constants through `$crate`
pub use gematria_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, GematriaError, Result};
pub use gematria::{compute_value, normalize};
pub use model::{Entry, EntryPatch, NewEntry};
pub use ops::{EntryStore, MemoryEntryStore, StoreHealth};
pub use reconcile::{reconcile, ReconcileReport, Reconciler, DEFAULT_CHUNK_SIZE};
