//! Error types for pdfscope.

use std::io;
use thiserror::Error;

/// Result type alias for pdfscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or analyzing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version header is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text fragments from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Analysis was requested before any document was loaded.
    #[error("Please upload a PDF first.")]
    NoDocument,

    /// Persona or job description is blank.
    #[error("Please enter both persona and job description.")]
    MissingQuery,

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid analysis configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error is a user-facing advisory rather than a failure.
    ///
    /// Advisory errors leave the session usable and need no retry logic;
    /// the caller only has to show the message.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Error::NoDocument | Error::MissingQuery)
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
