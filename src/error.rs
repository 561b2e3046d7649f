use std::io;

use thiserror::Error;

/// Errors raised by dictionary operations.
#[derive(Debug, Error)]
#[rustfmt::skip]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid dictionary path: {0}")]
    PathSyntax(String),
    #[error("Unsupported CBOR item for a name token: {0}")]
    UnsupportedCbor(String),
    #[error("Failed to parse dictionary description: {0}")]
    Parse(#[from] ParseError),
}

/// Errors raised while reading a dictionary description.
///
/// Every variant except `Read` carries the 1-based number of the physical
/// line that caused it.
#[derive(Debug, Error)]
#[rustfmt::skip]
pub enum ParseError {
    #[error("Illegal line")]
    MalformedLine(usize),
    #[error("Illegal line type '{kind}' in {context}")]
    IllegalLineType { kind: String, context: &'static str, line: usize },
    #[error("Unknown CBOR type '{0}'")]
    UnknownCborType(String, usize),
    #[error("Invalid {cbor_type} value '{value}'")]
    InvalidCborValue { cbor_type: &'static str, value: String, line: usize },
    #[error("Element '{0}' declares both nested elements and enum values")]
    StructuralConflict(String, usize),
    #[error("Unexpected end of input")]
    UnexpectedEof(usize),
    #[error("Failed while reading the description")]
    Read(#[source] io::Error),
}

impl ParseError {
    /// The line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedLine(line) => Some(*line),
            ParseError::IllegalLineType { line, .. } => Some(*line),
            ParseError::UnknownCborType(_, line) => Some(*line),
            ParseError::InvalidCborValue { line, .. } => Some(*line),
            ParseError::StructuralConflict(_, line) => Some(*line),
            ParseError::UnexpectedEof(line) => Some(*line),
            ParseError::Read(_) => None,
        }
    }

    fn format_message(message: &dyn ToString, source: &str, line_number: usize) -> String {
        let message = message.to_string();
        // Grab the exact line text (or empty if out of bounds)
        let line = line_number
            .checked_sub(1)
            .and_then(|idx| source.lines().nth(idx))
            .unwrap_or("");
        let indent = line.len() - line.trim_start().len();
        let underline_len = line.trim().chars().count().max(1);
        let caret = " ".repeat(indent) + &"^".repeat(underline_len);
        format!("line {line_number}: {message}\n{line}\n{caret}")
    }

    /// Renders the error together with the offending line of `source`.
    pub fn full_message(&self, source: &str) -> String {
        match self.line() {
            Some(line) => Self::format_message(self, source, line),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
