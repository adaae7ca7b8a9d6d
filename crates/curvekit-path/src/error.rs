//! Fatal parse errors and soft diagnostics.

use std::fmt;
use thiserror::Error;

/// Errors that abort parsing of a whole path data string.
///
/// Character indices are counted in `char`s from the start of the
/// argument text handed to the tokenizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected ',' at index {index}: two commas without a number between them")]
    DoubleComma { index: usize },

    #[error("Unexpected '{ch}' at index {index}: number already has a leading sign")]
    DoubleSign { ch: char, index: usize },

    #[error("Unexpected '.' at index {index}: number already ends with a decimal point")]
    DoubleDecimalPoint { index: usize },

    #[error("Unexpected '{ch}' at index {index}: exponent already has a sign")]
    DoubleExponentSign { ch: char, index: usize },

    #[error("Unexpected character '{ch}' at index {index}")]
    UnexpectedCharacter { ch: char, index: usize },

    #[error("Malformed number \"{text}\" at index {index}")]
    InvalidNumber { text: String, index: usize },

    #[error("Invalid arguments for '{letter}' command at offset {offset}: {source}")]
    InCommand {
        letter: char,
        offset: usize,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// The tokenizer error underneath any command context.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::InCommand { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for path parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Kind of soft failure encountered while parsing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// A command letter outside the path alphabet; its group was dropped.
    UnrecognizedCommand { letter: char },
    /// Trailing arguments that do not fill a whole argument group.
    IncompleteArguments {
        letter: char,
        arity: usize,
        dropped: usize,
    },
}

/// A soft failure: reported to the caller, parsing continues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset of the command letter in the path data.
    pub offset: usize,
    /// The raw command group text.
    pub text: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnrecognizedCommand { letter } => write!(
                f,
                "unrecognized command '{}' at offset {} dropped: {:?}",
                letter, self.offset, self.text
            ),
            DiagnosticKind::IncompleteArguments {
                letter,
                arity,
                dropped,
            } => write!(
                f,
                "'{}' at offset {} takes arguments in groups of {}; dropped {} trailing value(s)",
                letter, self.offset, arity, dropped
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause() {
        let err = ParseError::InCommand {
            letter: 'L',
            offset: 4,
            source: Box::new(ParseError::DoubleComma { index: 2 }),
        };
        assert_eq!(err.root_cause(), &ParseError::DoubleComma { index: 2 });
        assert!(err.to_string().contains("'L' command at offset 4"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::UnrecognizedCommand { letter: 'x' },
            offset: 7,
            text: "x 1 2".to_string(),
        };
        assert!(diagnostic.to_string().starts_with("unrecognized command 'x' at offset 7"));
    }
}
