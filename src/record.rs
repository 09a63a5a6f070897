//! Fixed-width record buffer.
//!
//! A [`Record`] is one physical line of a remittance file. It starts as
//! [`RECORD_WIDTH`] spaces and is filled by column-range writes. Columns are
//! 1-based and ranges are inclusive, matching how bank manuals describe
//! layouts ("posição 395 a 400").
//!
//! ```
//! use cnab400_rs::{Field, Record};
//!
//! let mut record = Record::new();
//! record.write(1, 1, &Field::Literal("9")).unwrap();
//! record.write(395, 400, &Field::number(3u32)).unwrap();
//!
//! assert_eq!(record.width(), 400);
//! assert_eq!(record.columns(395, 400), Some("000003"));
//! ```

use std::fmt;

use crate::error::RangeError;
use crate::field::{Field, PAD};

/// Nominal CNAB400 record width.
pub const RECORD_WIDTH: usize = 400;

/// One physical line of a remittance file.
///
/// Content is always ASCII, so byte offsets and columns coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    data: String,
    nominal: usize,
}

impl Record {
    /// A blank record of the nominal CNAB400 width.
    pub fn new() -> Self {
        Self::with_width(RECORD_WIDTH)
    }

    /// A blank record of an arbitrary nominal width.
    pub fn with_width(width: usize) -> Self {
        Self {
            data: PAD.to_string().repeat(width),
            nominal: width,
        }
    }

    /// Current width, including any extension.
    pub fn width(&self) -> usize {
        self.data.len()
    }

    /// Width the record was created with.
    pub fn nominal_width(&self) -> usize {
        self.nominal
    }

    /// True when an extension segment was added past the nominal width.
    pub fn is_extended(&self) -> bool {
        self.width() > self.nominal
    }

    /// Write `field` into columns `start..=end`, replacing whatever was there.
    pub fn write(&mut self, start: usize, end: usize, field: &Field) -> Result<(), RangeError> {
        self.check_range(start, end)?;
        let text = field.render(start, end)?;
        debug_assert_eq!(text.len(), end + 1 - start);
        self.data.replace_range(start - 1..end, &text);
        Ok(())
    }

    /// Change the record width to `width`.
    ///
    /// Growing pads the new columns with spaces. Shrinking is only allowed
    /// down to the nominal width and only over blank columns.
    pub fn extend(&mut self, width: usize) -> Result<(), RangeError> {
        let current = self.width();
        let refuse = RangeError::Extension {
            current,
            requested: width,
        };

        if width < self.nominal {
            return Err(refuse);
        }
        if width < current {
            if self.data[width..].chars().any(|c| c != PAD) {
                return Err(refuse);
            }
            self.data.truncate(width);
        } else {
            self.data.extend(std::iter::repeat_n(PAD, width - current));
        }
        Ok(())
    }

    /// Read columns `start..=end` back, or `None` when out of range.
    pub fn columns(&self, start: usize, end: usize) -> Option<&str> {
        if start == 0 || start > end || end > self.width() {
            return None;
        }
        Some(&self.data[start - 1..end])
    }

    /// The line text, exactly `width()` characters.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Freeze the record into its line text.
    pub fn into_string(self) -> String {
        self.data
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), RangeError> {
        if start == 0 || start > end {
            return Err(RangeError::Inverted { start, end });
        }
        if end > self.width() {
            return Err(RangeError::OutOfBounds {
                start,
                end,
                width: self.width(),
            });
        }
        Ok(())
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_blank() {
        let record = Record::new();
        assert_eq!(record.width(), RECORD_WIDTH);
        assert!(record.as_str().chars().all(|c| c == ' '));
        assert!(!record.is_extended());
    }

    #[test]
    fn test_write_places_columns() {
        let mut record = Record::new();
        record.write(3, 9, &Field::Literal("REMESSA")).unwrap();
        assert_eq!(&record.as_str()[..10], "  REMESSA ");
        assert_eq!(record.columns(3, 9), Some("REMESSA"));
    }

    #[test]
    fn test_later_write_wins() {
        let mut record = Record::new();
        record.write(109, 110, &Field::Literal("01")).unwrap();
        record.write(109, 110, &Field::Literal("02")).unwrap();
        assert_eq!(record.columns(109, 110), Some("02"));
    }

    #[test]
    fn test_partial_overlap_keeps_outside_columns() {
        let mut record = Record::new();
        record.write(1, 6, &Field::alpha("ABCDEF")).unwrap();
        record.write(3, 4, &Field::Literal("XY")).unwrap();
        assert_eq!(record.columns(1, 6), Some("ABXYEF"));
    }

    #[test]
    fn test_write_rejects_inverted_range() {
        let mut record = Record::new();
        let err = record.write(10, 9, &Field::Blank).unwrap_err();
        assert_eq!(err, RangeError::Inverted { start: 10, end: 9 });
        let err = record.write(0, 1, &Field::Blank).unwrap_err();
        assert_eq!(err, RangeError::Inverted { start: 0, end: 1 });
    }

    #[test]
    fn test_write_rejects_out_of_bounds() {
        let mut record = Record::new();
        let err = record.write(401, 444, &Field::digits("1")).unwrap_err();
        assert_eq!(
            err,
            RangeError::OutOfBounds {
                start: 401,
                end: 444,
                width: 400
            }
        );
    }

    #[test]
    fn test_failed_write_leaves_record_untouched() {
        let mut record = Record::new();
        assert!(record.write(1, 2, &Field::number(100u32)).is_err());
        assert_eq!(record, Record::new());
    }

    #[test]
    fn test_extend_then_write() {
        let mut record = Record::new();
        record.extend(444).unwrap();
        assert!(record.is_extended());
        record.write(401, 444, &Field::digits("123")).unwrap();
        assert_eq!(record.width(), 444);
        assert!(record.as_str().ends_with("000123"));
    }

    #[test]
    fn test_extend_refuses_to_drop_content() {
        let mut record = Record::new();
        record.extend(444).unwrap();
        record.write(444, 444, &Field::Literal("X")).unwrap();
        assert_eq!(
            record.extend(420).unwrap_err(),
            RangeError::Extension {
                current: 444,
                requested: 420
            }
        );
    }

    #[test]
    fn test_extend_shrinks_blank_extension() {
        let mut record = Record::new();
        record.extend(444).unwrap();
        record.extend(420).unwrap();
        assert_eq!(record.width(), 420);
        assert!(record.extend(399).is_err());
    }

    #[test]
    fn test_columns_out_of_range() {
        let record = Record::new();
        assert_eq!(record.columns(0, 1), None);
        assert_eq!(record.columns(5, 4), None);
        assert_eq!(record.columns(400, 401), None);
    }
}
