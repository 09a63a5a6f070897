//! Layout interpreter.
//!
//! Executes a [`Layout`] by applying its instructions, strictly in
//! declaration order, to a fresh blank [`Record`]. Because every write
//! replaces its columns entirely, the last write to a column decides its
//! final content.

use crate::error::RangeError;
use crate::layout::{Instruction, Layout};
use crate::record::Record;
use crate::trace::{LayoutTrace, Overwrite, WriteTrace};

/// Apply one instruction to `record`.
fn apply(record: &mut Record, instruction: &Instruction) -> Result<(), RangeError> {
    match instruction {
        Instruction::Write { start, end, field } => record.write(*start, *end, field),
        Instruction::Extend { width } => record.extend(*width),
    }
}

/// Build a record from a layout.
///
/// The first failing instruction aborts execution; no partially built
/// record is returned.
pub fn execute(layout: &Layout) -> Result<Record, RangeError> {
    let mut record = Record::with_width(layout.width());
    for instruction in layout.instructions() {
        apply(&mut record, instruction)?;
    }
    Ok(record)
}

/// Build a record from a layout, capturing a [`LayoutTrace`].
///
/// `line` is the record's 1-based position in the file, used for logging.
pub fn execute_traced(layout: &Layout, line: usize) -> Result<(Record, LayoutTrace), RangeError> {
    let mut record = Record::with_width(layout.width());
    // Columns touched by an earlier write, index 0 = column 1.
    let mut written = vec![false; record.width()];
    let mut writes = Vec::with_capacity(layout.len());
    let mut overwrites = Vec::new();

    for (index, instruction) in layout.instructions().iter().enumerate() {
        match instruction {
            Instruction::Write { start, end, .. } => {
                let before = record.clone();
                apply(&mut record, instruction)?;

                for (from, to) in written_runs(&written, *start, *end) {
                    let overwrite = Overwrite {
                        index,
                        start: from,
                        end: to,
                        previous: column_text(&before, from, to),
                        current: column_text(&record, from, to),
                    };
                    if overwrite.changed() {
                        tracing::debug!(
                            kind = %layout.kind(),
                            line,
                            columns = %format!("{from}..={to}"),
                            previous = %overwrite.previous,
                            current = %overwrite.current,
                            "layout overwrote earlier content"
                        );
                    }
                    overwrites.push(overwrite);
                }
                written[*start - 1..*end].fill(true);

                writes.push(WriteTrace {
                    index,
                    instruction: instruction.describe(),
                    text: column_text(&record, *start, *end),
                });
            }
            Instruction::Extend { width } => {
                apply(&mut record, instruction)?;
                written.resize(*width, false);
                writes.push(WriteTrace {
                    index,
                    instruction: instruction.describe(),
                    text: String::new(),
                });
            }
        }
    }

    let trace = LayoutTrace {
        kind: layout.kind(),
        line,
        writes,
        overwrites,
    };
    Ok((record, trace))
}

/// Contiguous runs of already-written columns inside `start..=end`.
fn written_runs(written: &[bool], start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start = None;
    for column in start..=end {
        match (written[column - 1], run_start) {
            (true, None) => run_start = Some(column),
            (false, Some(from)) => {
                runs.push((from, column - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(from) = run_start {
        runs.push((from, end));
    }
    runs
}

fn column_text(record: &Record, start: usize, end: usize) -> String {
    record.columns(start, end).unwrap_or_default().to_string()
}
