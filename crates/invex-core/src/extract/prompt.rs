//! Instruction schema for the structured extraction call.
//!
//! The field list, semantics and locale-conversion rules are fixed; the
//! model is asked to reason step by step before committing to values,
//! which helps on multi-line-item documents with mixed number formats.

/// System instruction describing every output field and its required
/// transformations.
pub const SYSTEM_PROMPT: &str = "\
You extract structured information from an invoice or order confirmation document. \
The document may be in German or English. All numeric values must be converted from \
German format (e.g. 14.949,38) to standard format (14949.38).

First reason step by step about the document, then reply with a single JSON object \
and nothing else. The object has these keys, in order:
- \"reasoning\": your step-by-step reasoning as a string.
- \"invoice_number\": the invoice, order, or document number (e.g. Auftrags-Nr., Rechnungsnummer).
- \"date\": document date in YYYY-MM-DD format. Convert from any format like \"25. Juli 2025\" to \"2025-07-25\".
- \"vendor_name\": name of the vendor, supplier, or issuing company.
- \"total_amount\": final total amount (Gesamtbetrag) as a number. Convert German format like 14.949,38 to 14949.38.
- \"currency\": currency code, e.g. EUR, USD.
- \"line_items\": JSON array of line items. Each item has: \"description\" (Bezeichnung), \
\"quantity\" (Menge as number), \"unit_price\" (Einzelpreis as number), \"total\" (Gesamt as number). \
Convert German number format to standard decimals.";

/// Wrap extracted document text as the user turn of the extraction call.
pub fn user_prompt(invoice_text: &str) -> String {
    format!(
        "Raw text extracted from an invoice or order confirmation document:\n\n{invoice_text}"
    )
}
