use thiserror::Error;

/// Malformed pattern text.
///
/// Line and column numbers are 1-based and count within the trimmed block,
/// so the first non-blank line of the input is line 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unrecognized character {ch:?} at line {line}, column {column} (expected 'O' or '.')")]
    UnrecognizedChar { line: usize, column: usize, ch: char },

    #[error("line {line} has {found} cells but the first line has {expected}")]
    RaggedRows {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("pattern is empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum IllusionError {
    #[error("malformed pattern: {0}")]
    Format(#[from] FormatError),

    #[error(
        "target pattern is {}x{} but the model grid is {}x{}",
        .found.0, .found.1, .expected.0, .expected.1
    )]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("grid must have at least one row and one column, got {height}x{width}")]
    EmptyGrid { height: usize, width: usize },

    #[error("optimizer could not find a best assignment: {reason}")]
    SolverUnknown { reason: String },

    #[error("optimizer reported the constraints as unsatisfiable")]
    Unsatisfiable,

    #[error("SAT backend failed: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("unknown view '{name}'{}", did_you_mean(.suggestion))]
    UnknownView {
        name: String,
        suggestion: Option<&'static str>,
    },

    #[error("unknown preset '{name}'{}", did_you_mean(.suggestion))]
    UnknownPreset {
        name: String,
        suggestion: Option<&'static str>,
    },

    #[error("invalid constraint '{0}': expected VIEW=TARGET[:WEIGHT]")]
    InvalidConstraintArg(String),

    #[error("could not read pattern file: {0}")]
    Io(#[from] std::io::Error),
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(". Did you mean '{}'?", s),
        None => String::new(),
    }
}

pub type Result<T, E = IllusionError> = std::result::Result<T, E>;
