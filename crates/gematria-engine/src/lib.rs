//! Gematria Engine - Orchestration layer
//!
//! Provides the command and query surface that the HTTP service and the
//! command-line tool share. Every operation goes through an `EntryStore`
//! and owns its lifecycle logging.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{
    apply_engine_query, ComputeResult, DebugInfoResult, EngineQuery, EngineQueryResult,
    HealthResult, LookupResult, DEFAULT_MATCHES_TOP, MAX_MATCHES_TOP,
};
