//! Document-to-text conversion.
//!
//! Two strategies: direct text-layer extraction for PDFs, vision-model
//! transcription for PNG images. Selection follows the declared content
//! type only; file bytes are never sniffed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tracing::debug;

use crate::llm::{ChatClient, ChatRequest, ContentPart};
use crate::pdf;

/// Instruction sent with every transcription request.
const TRANSCRIBE_INSTRUCTION: &str = "Extract all text from this invoice image exactly as it \
     appears. Include all numbers, dates, names, addresses, and line items.";

/// Output cap for transcription responses.
const TRANSCRIBE_MAX_TOKENS: u32 = 2000;

/// Supported upload document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `application/pdf`; the text layer is extracted directly.
    Pdf,
    /// `image/png`; text is transcribed by the vision model.
    Png,
}

impl DocumentKind {
    /// Map a declared media type to a document kind.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/pdf" => Some(Self::Pdf),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Convert document bytes into plain text using the strategy for `kind`.
pub async fn extract_text(
    client: &dyn ChatClient,
    kind: DocumentKind,
    data: &[u8],
) -> crate::error::Result<String> {
    match kind {
        DocumentKind::Pdf => Ok(pdf::extract_text(data)?),
        DocumentKind::Png => transcribe_image(client, data).await,
    }
}

/// Transcribe an invoice image with a single vision call.
///
/// The model's first response content is returned verbatim; a failed
/// call or an empty choice list propagates as an error rather than
/// degrading to empty text.
async fn transcribe_image(client: &dyn ChatClient, data: &[u8]) -> crate::error::Result<String> {
    debug!(bytes = data.len(), "transcribing invoice image");

    let request = ChatRequest {
        system: None,
        parts: vec![
            ContentPart::Text(TRANSCRIBE_INSTRUCTION.to_string()),
            ContentPart::ImagePng(BASE64_STANDARD.encode(data)),
        ],
        max_tokens: Some(TRANSCRIBE_MAX_TOKENS),
    };

    Ok(client.complete(request).await?)
}
