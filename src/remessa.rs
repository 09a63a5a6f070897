//! Remittance document: header, details, trailer.
//!
//! A [`Remessa`] collects boletos and, on [`Remessa::generate`], encodes the
//! whole file in one pass:
//!
//! 1. header (record 1)
//! 2. one detail per boleto, in insertion order, each stamped with its own
//!    record number (2, 3, ...)
//! 3. trailer, stamped with the total record count including itself
//!
//! Encoding is deferred to `generate` so record numbers are always known
//! when a detail is built. Generation is all-or-nothing: the first error
//! aborts it and no partial text is returned.

use crate::bank::Bank;
use crate::boleto::Boleto;
use crate::config::RemessaConfig;
use crate::error::RemessaError;
use crate::executor::{execute, execute_traced};
use crate::layout::Layout;
use crate::record::Record;
use crate::trace::RemessaTrace;

/// A remittance file for one bank account.
pub struct Remessa {
    bank: Box<dyn Bank>,
    config: RemessaConfig,
    boletos: Vec<Boleto>,
}

impl Remessa {
    /// Empty remittance for `bank`.
    pub fn new(bank: impl Bank + 'static, config: RemessaConfig) -> Self {
        Self::with_bank(Box::new(bank), config)
    }

    /// Build from an already boxed bank, e.g. one returned by
    /// [`bank::lookup`](crate::bank::lookup).
    pub fn with_bank(bank: Box<dyn Bank>, config: RemessaConfig) -> Self {
        Self {
            bank,
            config,
            boletos: Vec::new(),
        }
    }

    /// Queue a boleto. Nothing is encoded until [`Remessa::generate`].
    pub fn add_boleto(&mut self, boleto: Boleto) -> &mut Self {
        self.boletos.push(boleto);
        self
    }

    /// Queue several boletos, keeping their order.
    pub fn add_boletos(&mut self, boletos: impl IntoIterator<Item = Boleto>) -> &mut Self {
        self.boletos.extend(boletos);
        self
    }

    /// Bank whose layout encodes the file.
    pub fn bank(&self) -> &dyn Bank {
        self.bank.as_ref()
    }

    /// Account settings shared by every record.
    pub fn config(&self) -> &RemessaConfig {
        &self.config
    }

    /// Queued boletos in insertion order.
    pub fn boletos(&self) -> &[Boleto] {
        &self.boletos
    }

    /// Number of queued boletos.
    pub fn len(&self) -> usize {
        self.boletos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boletos.is_empty()
    }

    /// Separator between records.
    pub fn line_terminator(&self) -> &str {
        self.config
            .line_terminator
            .as_deref()
            .unwrap_or(self.bank.line_terminator())
    }

    /// Text appended after the last record.
    pub fn file_terminator(&self) -> &str {
        self.config
            .file_terminator
            .as_deref()
            .unwrap_or(self.bank.file_terminator())
    }

    /// Encode the whole file as text.
    pub fn generate(&self) -> Result<String, RemessaError> {
        let records = self.generate_records()?;
        Ok(self.join(records.iter().map(Record::as_str)))
    }

    /// Encode the whole file, returning one [`Record`] per line.
    pub fn generate_records(&self) -> Result<Vec<Record>, RemessaError> {
        let layouts = self.layouts()?;
        let mut records = Vec::with_capacity(layouts.len());
        for (index, layout) in layouts.iter().enumerate() {
            let line = index + 1;
            let record = execute(layout).map_err(|source| RemessaError::Range {
                kind: layout.kind(),
                line,
                source,
            })?;
            tracing::trace!(kind = %layout.kind(), line, width = record.width(), "record built");
            records.push(record);
        }
        Ok(records)
    }

    /// Encode the whole file and capture a trace of every layout.
    pub fn generate_traced(&self) -> Result<(String, RemessaTrace), RemessaError> {
        let layouts = self.layouts()?;
        let mut lines = Vec::with_capacity(layouts.len());
        let mut trace = RemessaTrace::default();
        for (index, layout) in layouts.iter().enumerate() {
            let line = index + 1;
            let (record, layout_trace) =
                execute_traced(layout, line).map_err(|source| RemessaError::Range {
                    kind: layout.kind(),
                    line,
                    source,
                })?;
            tracing::trace!(kind = %layout.kind(), line, width = record.width(), "record built");
            lines.push(record.into_string());
            trace.records.push(layout_trace);
        }
        Ok((self.join(lines.iter().map(String::as_str)), trace))
    }

    /// Validate the document and build every layout, in file order.
    fn layouts(&self) -> Result<Vec<Layout>, RemessaError> {
        let bank = self.bank.as_ref();
        bank.check_required(&self.config)?;
        bank.check_wallet(&self.config.wallet)?;
        if self.boletos.is_empty() {
            return Err(RemessaError::NoDetailRecords);
        }
        for boleto in &self.boletos {
            bank.check_wallet(&boleto.wallet)?;
        }

        let mut layouts = Vec::with_capacity(self.boletos.len() + 2);
        layouts.push(bank.header(&self.config)?);

        // The header is record 1; each detail carries its own record number.
        let mut count: u32 = 1;
        for boleto in &self.boletos {
            count += 1;
            layouts.push(bank.detail(&self.config, boleto, count)?);
        }
        count += 1;
        layouts.push(bank.trailer(&self.config, count)?);

        tracing::debug!(
            bank = bank.name(),
            boletos = self.boletos.len(),
            records = count,
            "remittance layouts built"
        );
        Ok(layouts)
    }

    fn join<'a>(&self, lines: impl Iterator<Item = &'a str>) -> String {
        let mut out = lines.collect::<Vec<_>>().join(self.line_terminator());
        out.push_str(self.file_terminator());
        out
    }
}
