//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Chat model call error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Response assembly error.
    #[error("assembly error: {0}")]
    Assembly(#[from] AssemblyError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract the text layer.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to chat model calls.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Transport or HTTP-status failure talking to the API.
    #[error("chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered without any choices.
    #[error("chat completion returned no choices")]
    NoChoices,

    /// The first choice carried no message content.
    #[error("chat completion returned empty message content")]
    EmptyContent,

    /// Model output could not be read as the expected fields.
    #[error("malformed model output: {0}")]
    Malformed(String),
}

/// Errors related to assembling the final invoice record.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The line_items payload was a string but not valid JSON.
    #[error("failed to parse line items JSON: {0}")]
    LineItemsJson(#[source] serde_json::Error),

    /// The line_items payload was neither an array nor a string.
    #[error("line_items is neither a JSON array nor a string")]
    LineItemsShape,

    /// A line item did not match the documented shape.
    #[error("line item {index}: {reason}")]
    LineItemShape { index: usize, reason: String },

    /// A numeric field could not be coerced to a number.
    #[error("failed to coerce {field} to a number: got {value}")]
    Coerce { field: String, value: String },
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
