//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent across the engine, the
//! reconciler and the HTTP layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entry identifiers
pub const FIELD_ENTRY_ID: &str = "entry_id";
pub const FIELD_PHRASE: &str = "phrase";
pub const FIELD_VALUE: &str = "value";

// Reconciliation counters
pub const FIELD_REQUESTED: &str = "requested";
pub const FIELD_UNIQUE: &str = "unique";
pub const FIELD_UPSERTED: &str = "upserted";
pub const FIELD_CHUNK_INDEX: &str = "chunk_index";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_PHRASE.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
