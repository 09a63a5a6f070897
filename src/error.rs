//! Error types for record encoding and remittance generation.
//!
//! - [`RangeError`]: a single column write or extension could not be applied
//!   to a [`Record`](crate::Record).
//! - [`RemessaError`]: a whole remittance could not be generated. Every
//!   variant aborts [`Remessa::generate`](crate::Remessa::generate); no
//!   partial file is ever returned.

use thiserror::Error;

use crate::layout::RecordKind;

/// A column write or extension that does not fit the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// `start` is zero or greater than `end`.
    #[error("invalid column range {start}..={end}")]
    Inverted { start: usize, end: usize },

    /// The range reaches past the record's current width.
    #[error("columns {start}..={end} fall outside record width {width}")]
    OutOfBounds {
        start: usize,
        end: usize,
        width: usize,
    },

    /// The rendered value needs more columns than the range provides.
    #[error("value '{value}' does not fit in columns {start}..={end} ({width} wide)")]
    Overflow {
        start: usize,
        end: usize,
        width: usize,
        value: String,
    },

    /// A numeric or digit field received something that is not a
    /// non-negative number.
    #[error("value '{value}' for columns {start}..={end} is not a non-negative number")]
    NotNumeric {
        start: usize,
        end: usize,
        value: String,
    },

    /// An extension would drop below the nominal width or discard content.
    #[error("cannot resize record from {current} to {requested} columns")]
    Extension { current: usize, requested: usize },
}

/// Errors raised while generating a remittance file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemessaError {
    /// A field write failed while building physical line `line` (1-based).
    #[error("{kind} record at line {line}: {source}")]
    Range {
        kind: RecordKind,
        line: usize,
        #[source]
        source: RangeError,
    },

    /// A field required by the bank or by the boleto's own state is absent.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// The wallet code is not one the bank accepts.
    #[error("wallet '{wallet}' is not supported by {bank} (supported: {})", .supported.join(", "))]
    UnsupportedWallet {
        bank: &'static str,
        wallet: String,
        supported: &'static [&'static str],
    },

    /// `generate` was called before any boleto was added.
    #[error("remittance has no detail records")]
    NoDetailRecords,
}

impl RemessaError {
    /// True for errors caused by a value not fitting its columns.
    pub fn is_range(&self) -> bool {
        matches!(self, RemessaError::Range { .. })
    }
}
