//! Data models produced by the extraction pipeline.

pub mod invoice;

pub use invoice::{InvoiceData, LineItem};
