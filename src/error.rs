//! Parse errors raised while reading report payloads.
//!
//! A structural mismatch in a report (missing terminator, missing
//! section delimiter) is not an error: it is counted and the file is
//! skipped. A recognized marker whose payload cannot be read is an
//! error and aborts the whole run.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("marker '{marker}' has no ':' separated value in line '{line}'")]
    MissingColon { marker: &'static str, line: String },

    #[error("marker '{marker}' expects an integer, found '{value}'")]
    InvalidInteger { marker: &'static str, value: String },

    #[error("marker '{marker}' expects a number, found '{value}'")]
    InvalidFloat { marker: &'static str, value: String },

    #[error("invalid elapsed time '{value}', expected H:M:S.fraction")]
    InvalidElapsed { value: String },

    #[error("row is missing field {index}: '{line}'")]
    MissingField { index: usize, line: String },

    #[error("field {index} expects an integer, found '{value}' in row '{line}'")]
    InvalidField {
        index: usize,
        value: String,
        line: String,
    },

    #[error("SAVINGS line for processor '{processor}' has no 'Analyzing assembly:' line")]
    SavingsWithoutAssembly { processor: String },
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
