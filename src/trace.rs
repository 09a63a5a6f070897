//! Trace types for layout execution.
//!
//! These types capture what each instruction did to a record, so a layout
//! can be reviewed column by column. Overwrites get their own entries: most
//! are deliberate conditional overrides, but an overwrite of unrelated data
//! usually means two fields were declared over the same columns.

use crate::layout::RecordKind;

/// What one instruction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteTrace {
    /// Position of the instruction in its layout.
    pub index: usize,
    /// Human-readable instruction, e.g. `WRITE 109..=110`.
    pub instruction: String,
    /// Columns after the instruction ran (empty for extensions).
    pub text: String,
}

/// A write that replaced columns an earlier write had already filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overwrite {
    /// Instruction that did the overwriting.
    pub index: usize,
    /// First overlapping column (1-based).
    pub start: usize,
    /// Last overlapping column (1-based, inclusive).
    pub end: usize,
    /// Content of the overlapping span before the write.
    pub previous: String,
    /// Content of the overlapping span after the write.
    pub current: String,
}

impl Overwrite {
    /// True when the write changed the visible content.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Trace of one record's layout execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTrace {
    pub kind: RecordKind,
    /// 1-based line number in the generated file, 0 when run standalone.
    pub line: usize,
    pub writes: Vec<WriteTrace>,
    pub overwrites: Vec<Overwrite>,
}

/// Traces for every line of a generated remittance, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemessaTrace {
    pub records: Vec<LayoutTrace>,
}

impl RemessaTrace {
    /// All overwrites that changed content, paired with their record trace.
    pub fn changed_overwrites(&self) -> impl Iterator<Item = (&LayoutTrace, &Overwrite)> {
        self.records.iter().flat_map(|record| {
            record
                .overwrites
                .iter()
                .filter(|o| o.changed())
                .map(move |o| (record, o))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overwrite(previous: &str, current: &str) -> Overwrite {
        Overwrite {
            index: 3,
            start: 109,
            end: 110,
            previous: previous.to_string(),
            current: current.to_string(),
        }
    }

    #[test]
    fn test_overwrite_changed() {
        assert!(overwrite("01", "02").changed());
        assert!(!overwrite("00", "00").changed());
    }

    #[test]
    fn test_changed_overwrites_skips_identical() {
        let trace = RemessaTrace {
            records: vec![LayoutTrace {
                kind: RecordKind::Detail,
                line: 2,
                writes: vec![],
                overwrites: vec![overwrite("01", "01"), overwrite("01", "06")],
            }],
        };
        let changed: Vec<_> = trace.changed_overwrites().collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].0.line, 2);
        assert_eq!(changed[0].1.current, "06");
    }

    #[test]
    fn test_empty_trace() {
        let trace = RemessaTrace::default();
        assert_eq!(trace.changed_overwrites().count(), 0);
    }
}
