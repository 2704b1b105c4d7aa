//! LLM-backed invoice extraction pipeline.

mod assembler;
mod fields;
pub mod prompt;

pub use assembler::assemble;
pub use fields::RawInvoiceFields;

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::llm::{ChatClient, ChatRequest, ContentPart};
use crate::models::InvoiceData;
use crate::text::{self, DocumentKind};

/// End-to-end invoice extraction pipeline.
///
/// Built once at startup around a configured [`ChatClient`] and reused,
/// read-only, for every request; there is no per-request configuration.
pub struct InvoicePipeline {
    client: Arc<dyn ChatClient>,
}

impl InvoicePipeline {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Parse one uploaded document into validated invoice data.
    pub async fn parse(&self, kind: DocumentKind, data: &[u8]) -> Result<InvoiceData> {
        let text = text::extract_text(self.client.as_ref(), kind, data).await?;
        debug!(?kind, chars = text.len(), "document converted to text");

        let raw = self.extract_fields(&text).await?;
        let invoice = assembler::assemble(raw)?;
        info!(
            invoice_number = %invoice.invoice_number,
            line_items = invoice.line_items.len(),
            "invoice extracted"
        );
        Ok(invoice)
    }

    /// Run the structured extraction call on document text.
    async fn extract_fields(&self, invoice_text: &str) -> Result<RawInvoiceFields> {
        let request = ChatRequest {
            system: Some(prompt::SYSTEM_PROMPT.to_string()),
            parts: vec![ContentPart::Text(prompt::user_prompt(invoice_text))],
            max_tokens: None,
        };

        let output = self.client.complete(request).await?;
        Ok(RawInvoiceFields::from_model_output(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvexError, ModelError};
    use crate::llm::MockChatClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pipeline() -> (InvoicePipeline, Arc<MockChatClient>) {
        let client = Arc::new(MockChatClient::default());
        (InvoicePipeline::new(client.clone()), client)
    }

    fn structured_reply() -> String {
        json!({
            "reasoning": "totals listed at the bottom of the page",
            "invoice_number": "AB-2025-117",
            "date": "2025-07-25",
            "vendor_name": "Musterfirma GmbH",
            "total_amount": 14949.38,
            "currency": "EUR",
            "line_items": json!([
                {"description": "Stahlträger", "quantity": 2, "unit_price": 7474.69, "total": 14949.38}
            ]).to_string(),
        })
        .to_string()
    }

    #[tokio::test]
    async fn png_upload_runs_transcription_then_extraction() {
        let (pipeline, client) = pipeline();
        client.push_response("Auftragsbestätigung Nr. AB-2025-117 ...");
        client.push_response(structured_reply());

        let invoice = pipeline
            .parse(DocumentKind::Png, b"\x89PNG fake bytes")
            .await
            .unwrap();

        assert_eq!(invoice.invoice_number, "AB-2025-117");
        assert_eq!(invoice.date, "2025-07-25");
        assert_eq!(invoice.vendor_name, "Musterfirma GmbH");
        assert_eq!(invoice.total_amount, 14949.38);
        assert_eq!(invoice.currency, "EUR");
        assert_eq!(invoice.line_items.len(), 1);

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        // First call is the vision transcription, second the reasoning call.
        assert!(requests[0].system.is_none());
        assert!(
            requests[0]
                .parts
                .iter()
                .any(|p| matches!(p, ContentPart::ImagePng(_)))
        );
        assert_eq!(requests[1].system.as_deref(), Some(prompt::SYSTEM_PROMPT));
        assert!(requests[1].parts.iter().all(|p| matches!(p, ContentPart::Text(_))));
    }

    #[tokio::test]
    async fn extraction_call_receives_the_transcribed_text() {
        let (pipeline, client) = pipeline();
        client.push_response("THE TRANSCRIPT");
        client.push_response(structured_reply());

        pipeline.parse(DocumentKind::Png, b"img").await.unwrap();

        let requests = client.requests();
        let ContentPart::Text(user) = &requests[1].parts[0] else {
            panic!("extraction call should carry a text part");
        };
        assert!(user.contains("THE TRANSCRIPT"));
    }

    #[tokio::test]
    async fn malformed_structured_reply_is_a_model_error() {
        let (pipeline, client) = pipeline();
        client.push_response("transcript");
        client.push_response("I am sorry, I cannot help with that.");

        let err = pipeline.parse(DocumentKind::Png, b"img").await.unwrap_err();
        assert!(matches!(err, InvexError::Model(ModelError::Malformed(_))));
    }

    #[tokio::test]
    async fn malformed_pdf_fails_before_any_model_call() {
        let (pipeline, client) = pipeline();

        let err = pipeline
            .parse(DocumentKind::Pdf, b"not a pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, InvexError::Pdf(_)));
        assert!(client.requests().is_empty());
    }
}
