use thiserror::Error;

/// Errors returned to the caller of the library.
#[derive(Debug, Error)]
pub enum FortuneError {
	#[error("Model order must be >= 2, got {0}")]
	InvalidOrder(usize),

	#[error("Invalid generation input: {0}")]
	InvalidInput(String),

	#[error("Context mismatch while merging: {0}")]
	ContextMismatch(String),

	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),
}

/// Reason a single generation attempt was abandoned.
///
/// Attempt failures are recovered by the retry loop and never reach the
/// caller; they only show up in debug logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
	#[error("no start bigrams available")]
	EmptyModel,

	#[error("unknown context ({0}, {1})")]
	UnknownContext(String, String),

	#[error("separator {0:?} not found in the generated sentence")]
	MissingSeparator(String),

	#[error("sentence too short with all separators")]
	ShortSentence,

	#[error("malformed reconstruction: {0}")]
	MalformedReconstruction(String),
}
