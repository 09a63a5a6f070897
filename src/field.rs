//! Field values and their fixed-width rendering.
//!
//! A [`Field`] is the value half of a layout write: it knows how to render
//! itself into exactly `end - start + 1` columns.
//!
//! | kind      | alignment | pad   | too long                   |
//! |-----------|-----------|-------|----------------------------|
//! | `Numeric` | right     | `'0'` | [`RangeError::Overflow`]   |
//! | `Digits`  | right     | `'0'` | [`RangeError::Overflow`]   |
//! | `Alpha`   | left      | `' '` | truncated silently         |
//! | `Literal` | right     | `' '` | [`RangeError::Overflow`]   |
//! | `Code`    | right     | `' '` | [`RangeError::Overflow`]   |
//! | `Date`    | -         | -     | needs 6 columns            |
//! | `Blank`   | -         | `' '` | -                          |
//!
//! Alphanumeric truncation is lossy on purpose: the format caps free text
//! (names, addresses) at the column width and banks expect the prefix.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::RangeError;
use crate::format::{date_ddmmyy, normalize_alpha};

/// Pad character for unwritten columns and text fields.
pub const PAD: char = ' ';

/// The value-producing half of a column write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Fixed-point number: `value * 10^scale`, rounded half away from zero,
    /// zero padded on the left.
    Numeric { value: Decimal, scale: u32 },
    /// Pre-rendered identifier (agency, account, tax id, check character).
    /// Letters are upper-cased.
    Digits(String),
    /// Free text: upper-cased, accent-folded, left aligned.
    Alpha(String),
    /// Layout constant written as-is.
    Literal(&'static str),
    /// Runtime code written as given, without case folding.
    Code(String),
    /// `ddmmyy` date.
    Date(NaiveDate),
    /// Reserved columns, all spaces.
    Blank,
}

impl Field {
    /// Integer numeric field.
    pub fn number(value: impl Into<Decimal>) -> Self {
        Field::Numeric {
            value: value.into(),
            scale: 0,
        }
    }

    /// Currency amount in cents (two implied decimals).
    pub fn amount(value: Decimal) -> Self {
        Field::Numeric { value, scale: 2 }
    }

    /// Numeric field with an explicit decimal scale.
    pub fn scaled(value: Decimal, scale: u32) -> Self {
        Field::Numeric { value, scale }
    }

    /// Identifier zero padded on the left.
    pub fn digits(value: impl Into<String>) -> Self {
        Field::Digits(value.into())
    }

    /// Free text, truncated to the field width.
    pub fn alpha(value: impl Into<String>) -> Self {
        Field::Alpha(value.into())
    }

    /// Bank command code, right aligned.
    pub fn code(value: impl Into<String>) -> Self {
        Field::Code(value.into())
    }

    /// Render into exactly `end - start + 1` characters.
    ///
    /// `start` and `end` are only used for error reporting; the caller has
    /// already validated them against the record.
    pub fn render(&self, start: usize, end: usize) -> Result<String, RangeError> {
        let width = end + 1 - start;
        let overflow = |value: String| RangeError::Overflow {
            start,
            end,
            width,
            value,
        };

        match self {
            Field::Numeric { value, scale } => {
                let scaled =
                    scale_to_integer(*value, *scale).ok_or_else(|| overflow(value.to_string()))?;
                if scaled.is_sign_negative() && !scaled.is_zero() {
                    return Err(RangeError::NotNumeric {
                        start,
                        end,
                        value: value.to_string(),
                    });
                }
                let digits = scaled
                    .abs()
                    .to_u128()
                    .ok_or_else(|| overflow(value.to_string()))?
                    .to_string();
                if digits.len() > width {
                    return Err(overflow(digits));
                }
                Ok(format!("{digits:0>width$}"))
            }
            Field::Digits(code) => {
                if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(RangeError::NotNumeric {
                        start,
                        end,
                        value: code.clone(),
                    });
                }
                if code.len() > width {
                    return Err(overflow(code.clone()));
                }
                let code = code.to_ascii_uppercase();
                Ok(format!("{code:0>width$}"))
            }
            Field::Alpha(text) => {
                let text: String = normalize_alpha(text).chars().take(width).collect();
                Ok(format!("{text:<width$}"))
            }
            Field::Literal(text) => {
                right_aligned(text, width).ok_or_else(|| overflow(text.to_string()))
            }
            Field::Code(text) => right_aligned(text, width).ok_or_else(|| overflow(text.clone())),
            Field::Date(date) => {
                let text = date_ddmmyy(*date);
                if text.len() != width {
                    return Err(overflow(text));
                }
                Ok(text)
            }
            Field::Blank => Ok(PAD.to_string().repeat(width)),
        }
    }
}

/// `value * 10^scale` rounded to an integer, or `None` when it does not fit
/// in a `Decimal`.
fn scale_to_integer(value: Decimal, scale: u32) -> Option<Decimal> {
    let factor = Decimal::from(10u64.checked_pow(scale)?);
    Some(
        value
            .checked_mul(factor)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
    )
}

fn right_aligned(text: &str, width: usize) -> Option<String> {
    if !text.is_ascii() || text.len() > width {
        return None;
    }
    Some(format!("{text:>width$}"))
}

impl From<&'static str> for Field {
    fn from(text: &'static str) -> Self {
        Field::Literal(text)
    }
}

impl From<NaiveDate> for Field {
    fn from(date: NaiveDate) -> Self {
        Field::Date(date)
    }
}
