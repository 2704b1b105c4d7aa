//! Invoice data models returned to API clients.

use serde::{Deserialize, Serialize};

/// A single line item on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product or service description.
    pub description: String,

    /// Number of units.
    pub quantity: f64,

    /// Price per unit.
    pub unit_price: f64,

    /// Total price for this line.
    pub total: f64,
}

/// Structured data extracted from one invoice document.
///
/// Created per request by the response assembler and discarded after the
/// response is sent; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    /// Invoice or order number (e.g. "INV-2024-001").
    pub invoice_number: String,

    /// Document date in YYYY-MM-DD format.
    pub date: String,

    /// Name of the vendor or supplier.
    pub vendor_name: String,

    /// Final total amount including tax.
    pub total_amount: f64,

    /// Currency code (e.g. "EUR", "USD").
    pub currency: String,

    /// Line items in the order the document lists them.
    pub line_items: Vec<LineItem>,
}
