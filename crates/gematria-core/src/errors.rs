use gematria_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code. The HTTP layer maps kinds to
/// status codes, so the distinction between `StoreUnavailable`,
/// `SchemaMissing` and `Conflict` must survive every layer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,

    // Lookup
    NotFound,

    // Uniqueness on the phrase column
    Conflict,

    // Store availability
    /// The database could not be reached or opened
    StoreUnavailable,
    /// The database is reachable but the entries table does not exist
    SchemaMissing,

    // Integration/IO
    Persistence,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::SchemaMissing => "ERR_SCHEMA_MISSING",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for the kinds that mean "the store cannot serve requests right now"
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::StoreUnavailable | ExErrorKind::SchemaMissing
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context. Reconciliation
/// failures additionally record which chunk failed and how many rows the
/// earlier chunks had already committed.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    phrase: Option<String>,
    chunk_index: Option<usize>,
    rows_committed: Option<u64>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            phrase: None,
            chunk_index: None,
            rows_committed: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add phrase context
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self
    }

    /// Record the failing chunk of a bulk reconciliation
    pub fn with_chunk(mut self, chunk_index: usize, rows_committed: u64) -> Self {
        self.chunk_index = Some(chunk_index);
        self.rows_committed = Some(rows_committed);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the phrase context, if any
    pub fn phrase(&self) -> Option<&str> {
        self.phrase.as_deref()
    }

    /// Index of the chunk that failed, for reconciliation errors
    pub fn chunk_index(&self) -> Option<usize> {
        self.chunk_index
    }

    /// Rows committed by earlier chunks before the failure
    pub fn rows_committed(&self) -> Option<u64> {
        self.rows_committed
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(phrase) = &self.phrase {
            write!(f, " (phrase: {})", phrase)?;
        }
        if let Some(chunk) = self.chunk_index {
            write!(f, " (chunk: {})", chunk)?;
        }
        if let Some(rows) = self.rows_committed {
            write!(f, " (rows_committed: {})", rows)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by gematria operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GematriaError {
    /// No entry with this id
    #[error("Entry not found: {id}")]
    EntryNotFound { id: i64 },

    /// No entry with this phrase
    #[error("Phrase not found: {phrase}")]
    PhraseNotFound { phrase: String },

    /// Another entry already owns this phrase
    #[error("Phrase already exists: {phrase}")]
    PhraseExists { phrase: String },

    /// Phrase was empty after trimming
    #[error("Phrase must not be empty")]
    EmptyPhrase,

    /// Result limit outside the accepted range
    #[error("Limit {limit} out of range 1..={max}")]
    InvalidLimit { limit: i64, max: u32 },

    /// Reconciler chunk size of zero
    #[error("Chunk size must be at least 1")]
    InvalidChunkSize,
}

impl From<GematriaError> for ExError {
    fn from(err: GematriaError) -> Self {
        let message = err.to_string();
        match err {
            GematriaError::EntryNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message("Entry not found"),

            GematriaError::PhraseNotFound { phrase } => ExError::new(ExErrorKind::NotFound)
                .with_phrase(phrase)
                .with_message("Phrase not found"),

            GematriaError::PhraseExists { phrase } => ExError::new(ExErrorKind::Conflict)
                .with_phrase(phrase)
                .with_message("Phrase already exists"),

            GematriaError::EmptyPhrase
            | GematriaError::InvalidLimit { .. }
            | GematriaError::InvalidChunkSize => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
        }
    }
}
