use thiserror::Error;

/// Errors surfaced by the host circuit and the configuration layer.
///
/// Element evaluation itself is infallible: logic levels are always
/// well-defined, so `step` cannot fault.
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("unknown element type `{0}`")]
    UnknownElementType(String),

    #[error("no element named `{0}`")]
    UnknownElement(String),

    #[error("an element named `{0}` already exists")]
    DuplicateElement(String),

    #[error("pin index {pin} out of range for element `{element}`")]
    PinOutOfRange { element: String, pin: usize },

    #[error("malformed dump record: {0}")]
    BadDump(String),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
