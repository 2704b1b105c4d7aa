//! Assembly of validated invoice data from raw extraction fields.

use serde_json::Value;

use crate::error::AssemblyError;
use crate::models::{InvoiceData, LineItem};

use super::fields::RawInvoiceFields;

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Validate raw fields and produce the final record.
///
/// The whole request fails on any shape violation: no partial line-item
/// recovery, no skipping of malformed items, no defaulting of missing
/// fields.
pub fn assemble(raw: RawInvoiceFields) -> Result<InvoiceData> {
    let line_items = parse_line_items(raw.line_items)?;
    let total_amount = coerce_number("total_amount", &raw.total_amount)?;

    Ok(InvoiceData {
        invoice_number: raw.invoice_number,
        date: raw.date,
        vendor_name: raw.vendor_name,
        total_amount,
        currency: raw.currency,
        line_items,
    })
}

/// Decode the line-item payload, which arrives either as a JSON-encoded
/// string or as an already structured array. An absent or empty payload
/// means no line items.
fn parse_line_items(value: Option<Value>) -> Result<Vec<LineItem>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(Vec::new()),
        Some(Value::String(s)) => {
            serde_json::from_str::<Value>(&s).map_err(AssemblyError::LineItemsJson)?
        }
        Some(other) => other,
    };

    let Value::Array(items) = items else {
        return Err(AssemblyError::LineItemsShape);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_line_item(index, item))
        .collect()
}

fn parse_line_item(index: usize, item: &Value) -> Result<LineItem> {
    let Value::Object(map) = item else {
        return Err(AssemblyError::LineItemShape {
            index,
            reason: "not a JSON object".to_string(),
        });
    };

    let description = map
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| AssemblyError::LineItemShape {
            index,
            reason: "missing string field `description`".to_string(),
        })?
        .to_string();

    let numeric = |name: &str| -> Result<f64> {
        let value = map.get(name).ok_or_else(|| AssemblyError::LineItemShape {
            index,
            reason: format!("missing numeric field `{name}`"),
        })?;
        coerce_number(name, value).map_err(|_| AssemblyError::LineItemShape {
            index,
            reason: format!("field `{name}` is not numeric"),
        })
    };

    Ok(LineItem {
        description,
        quantity: numeric("quantity")?,
        unit_price: numeric("unit_price")?,
        total: numeric("total")?,
    })
}

/// Coerce a JSON value to f64; numeric strings are accepted.
fn coerce_number(field: &str, value: &Value) -> Result<f64> {
    let coerced = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    coerced.ok_or_else(|| AssemblyError::Coerce {
        field: field.to_string(),
        value: value.to_string(),
    })
}
