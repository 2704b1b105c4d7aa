//! Core library for LLM-backed invoice extraction.
//!
//! This crate provides:
//! - PDF text-layer extraction (page-by-page, no OCR fallback)
//! - invoice image transcription through a vision-capable chat model
//! - structured field extraction with a step-by-step reasoning prompt
//! - response assembly into validated invoice data

pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod pdf;
pub mod text;

pub use error::{AssemblyError, InvexError, ModelError, PdfError, Result};
pub use extract::{InvoicePipeline, RawInvoiceFields};
pub use llm::{ChatClient, ChatRequest, ContentPart, MockChatClient, OpenAiChatClient};
pub use models::{InvoiceData, LineItem};
pub use text::DocumentKind;
