use std::{error::Error, fmt, io};

/// The result type used across the pricing pipeline.
pub type Result<T> = std::result::Result<T, MlError>;

/// Errors produced while loading data, fitting or applying a model.
#[derive(Debug)]
pub enum MlError {
    /// The input file could not be read or written.
    Io(io::Error),

    /// A JSON document (config or model artifact) could not be (de)serialized.
    Json(serde_json::Error),

    /// A required column is absent from the loaded table.
    MissingColumn(String),

    /// A CSV line does not have as many fields as the header.
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },

    /// A cell could not be parsed into the type its column requires.
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// An input that must hold at least one element is empty.
    EmptyInput(&'static str),

    /// An input is invalid for semantic reasons.
    InvalidInput(String),

    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// The encoded columns do not line up with the ones the model was fitted on.
    ColumnMismatch {
        expected: Vec<String>,
        got: Vec<String>,
    },

    /// A categorical value was not observed when the encoder was fitted.
    UnknownCategory {
        column: &'static str,
        value: String,
    },

    /// The least-squares solver did not converge.
    NotConverged { sweeps: usize },

    /// The training configuration is invalid.
    InvalidConfig(String),
}

impl fmt::Display for MlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlError::Io(e) => write!(f, "io error: {e}"),
            MlError::Json(e) => write!(f, "json error: {e}"),
            MlError::MissingColumn(name) => write!(f, "missing column: {name}"),
            MlError::RaggedRow {
                line,
                got,
                expected,
            } => write!(
                f,
                "line {line}: expected {expected} fields, got {got}"
            ),
            MlError::InvalidValue { row, column, value } => {
                write!(f, "row {row}: cannot parse '{value}' as {column}")
            }
            MlError::EmptyInput(what) => write!(f, "{what} is empty"),
            MlError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MlError::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            MlError::ColumnMismatch { expected, got } => write!(
                f,
                "encoded columns [{}] do not match the model columns [{}]",
                got.join(", "),
                expected.join(", ")
            ),
            MlError::UnknownCategory { column, value } => {
                write!(f, "unknown {column} '{value}', it was not seen during training")
            }
            MlError::NotConverged { sweeps } => {
                write!(f, "least squares solver did not converge after {sweeps} sweeps")
            }
            MlError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for MlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlError::Io(e) => Some(e),
            MlError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MlError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for MlError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
