//! `invoicehub-core`: money arithmetic and shared domain primitives.
//!
//! This crate is **pure**: no IO, no HTTP, no rendering. Everything here can be
//! exercised from a unit test without a runtime.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainResult, MalformedField, MalformedReason, ValidationError};
pub use id::LineId;
pub use money::{
    InvoiceTotals, LineAmounts, LineTotals, MAX_AMOUNT, Taxable, aggregate, format_inr,
    format_inr_compact, format_inr_fixed, format_rate, line_totals, parse_amount,
    parse_amount_checked,
};
