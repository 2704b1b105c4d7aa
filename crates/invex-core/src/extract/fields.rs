//! Typed result of the structured extraction call.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ModelError;

/// Fields as returned by the reasoning call, before assembly.
///
/// `total_amount` and `line_items` stay loosely typed on purpose: the
/// model may emit numbers as strings and line items either as a JSON
/// array or as a JSON-encoded string. The assembler settles both; every
/// other field is required up front.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvoiceFields {
    /// Chain-of-thought preamble; never part of the invoice data.
    #[serde(default)]
    pub reasoning: Option<String>,

    pub invoice_number: String,
    pub date: String,
    pub vendor_name: String,
    pub total_amount: Value,
    pub currency: String,

    #[serde(default)]
    pub line_items: Option<Value>,
}

impl RawInvoiceFields {
    /// Parse a model reply into raw fields.
    ///
    /// The reply is located as JSON leniently before deserializing: a
    /// direct parse, then a fenced code block, then the outermost
    /// `{…}` slice.
    pub fn from_model_output(output: &str) -> Result<Self, ModelError> {
        let value = locate_json(output)
            .ok_or_else(|| ModelError::Malformed("no JSON object in model output".to_string()))?;
        serde_json::from_value(value).map_err(|e| ModelError::Malformed(e.to_string()))
    }
}

fn locate_json(s: &str) -> Option<Value> {
    let t = s.trim().trim_start_matches('\u{feff}').trim();

    if let Ok(v) = serde_json::from_str::<Value>(t) {
        return Some(v);
    }

    if let Some(block) = fenced_block(t, "```json").or_else(|| fenced_block(t, "```")) {
        if let Ok(v) = serde_json::from_str::<Value>(block) {
            return Some(v);
        }
    }

    let (i, j) = (t.find('{')?, t.rfind('}')?);
    if i < j {
        if let Ok(v) = serde_json::from_str::<Value>(&t[i..=j]) {
            return Some(v);
        }
    }

    None
}

fn fenced_block<'a>(s: &'a str, fence: &str) -> Option<&'a str> {
    let start = s.find(fence)? + fence.len();
    let end = s[start..].find("```")?;
    Some(&s[start..start + end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REPLY: &str = r#"{
        "reasoning": "the total appears after Gesamtbetrag",
        "invoice_number": "AB-2025-117",
        "date": "2025-07-25",
        "vendor_name": "Musterfirma GmbH",
        "total_amount": 14949.38,
        "currency": "EUR",
        "line_items": "[{\"description\": \"Stahl\", \"quantity\": 2, \"unit_price\": 7474.69, \"total\": 14949.38}]"
    }"#;

    #[test]
    fn parses_a_bare_json_reply() {
        let raw = RawInvoiceFields::from_model_output(REPLY).unwrap();
        assert_eq!(raw.invoice_number, "AB-2025-117");
        assert_eq!(raw.currency, "EUR");
        assert!(raw.reasoning.is_some());
    }

    #[test]
    fn parses_a_fenced_reply() {
        let fenced = format!("Here is the result:\n```json\n{REPLY}\n```\nDone.");
        let raw = RawInvoiceFields::from_model_output(&fenced).unwrap();
        assert_eq!(raw.vendor_name, "Musterfirma GmbH");
    }

    #[test]
    fn parses_a_reply_wrapped_in_prose() {
        let wrapped = format!("Sure! {REPLY} Let me know if you need anything else.");
        let raw = RawInvoiceFields::from_model_output(&wrapped).unwrap();
        assert_eq!(raw.date, "2025-07-25");
    }

    #[test]
    fn reasoning_and_line_items_are_optional() {
        let raw = RawInvoiceFields::from_model_output(
            r#"{"invoice_number":"1","date":"2025-01-01","vendor_name":"v",
                "total_amount":"12,5","currency":"EUR"}"#,
        )
        .unwrap();
        assert!(raw.reasoning.is_none());
        assert!(raw.line_items.is_none());
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let err = RawInvoiceFields::from_model_output(
            r#"{"invoice_number":"1","date":"2025-01-01","total_amount":1,"currency":"EUR"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }

    #[test]
    fn reply_without_json_is_malformed() {
        let err = RawInvoiceFields::from_model_output("I could not read the document.").unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }
}
