//! Declarative record layouts.
//!
//! A [`Layout`] is an ordered list of [`Instruction`]s for one record kind.
//! Order matters: a later write over columns that an earlier write already
//! filled replaces them, which is how bank layouts express "default value,
//! overridden when the boleto asks for something else".
//!
//! ```
//! use cnab400_rs::{Field, Layout, RecordKind, execute};
//!
//! let mut layout = Layout::new(RecordKind::Trailer);
//! layout
//!     .put(1, 1, "9")
//!     .put(2, 394, Field::Blank)
//!     .put(395, 400, Field::number(3u32));
//!
//! let record = execute(&layout).unwrap();
//! assert!(record.as_str().starts_with('9'));
//! assert!(record.as_str().ends_with("000003"));
//! ```

use std::fmt;

use crate::field::Field;
use crate::record::RECORD_WIDTH;

/// The three physical record kinds of a CNAB400 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Header,
    Detail,
    Trailer,
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Header => "header",
            RecordKind::Detail => "detail",
            RecordKind::Trailer => "trailer",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Write `field` into columns `start..=end` (1-based, inclusive).
    Write {
        start: usize,
        end: usize,
        field: Field,
    },
    /// Change the record width (extension segments past column 400).
    Extend { width: usize },
}

impl Instruction {
    /// Short description used in traces and logs.
    pub fn describe(&self) -> String {
        match self {
            Instruction::Write { start, end, .. } => format!("WRITE {start}..={end}"),
            Instruction::Extend { width } => format!("EXTEND {width}"),
        }
    }
}

/// Ordered instructions that build one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    kind: RecordKind,
    width: usize,
    instructions: Vec<Instruction>,
}

impl Layout {
    /// An empty layout for a record of the nominal CNAB400 width.
    pub fn new(kind: RecordKind) -> Self {
        Self::with_width(kind, RECORD_WIDTH)
    }

    pub fn with_width(kind: RecordKind, width: usize) -> Self {
        Self {
            kind,
            width,
            instructions: Vec::new(),
        }
    }

    /// Append a write of `field` into columns `start..=end`.
    pub fn put(&mut self, start: usize, end: usize, field: impl Into<Field>) -> &mut Self {
        self.instructions.push(Instruction::Write {
            start,
            end,
            field: field.into(),
        });
        self
    }

    /// Append an extension of the record to `width` columns.
    pub fn extend(&mut self, width: usize) -> &mut Self {
        self.instructions.push(Instruction::Extend { width });
        self
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Width of the blank record the layout starts from.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
