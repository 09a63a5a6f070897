//! Command-line front end for cnab400-rs.
//!
//! A remittance request is one JSON document naming the bank, the account
//! configuration and the boletos to register:
//!
//! ```json
//! { "bank": "237", "config": { ... }, "boletos": [ ... ] }
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use cnab400_rs::{Boleto, Remessa, RemessaConfig, RemessaError, RemessaTrace, lookup};
use serde::Deserialize;
use thiserror::Error;

/// A remittance request as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Bank code or name, e.g. `"237"` or `"bradesco"`.
    pub bank: String,
    pub config: RemessaConfig,
    #[serde(default)]
    pub boletos: Vec<Boleto>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid request '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown bank '{0}'")]
    UnknownBank(String),

    #[error(transparent)]
    Remessa(#[from] RemessaError),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a request from JSON text. `path` is only used in error messages.
pub fn parse_request(text: &str, path: &str) -> Result<Request, CliError> {
    serde_json::from_str(text).map_err(|source| CliError::Parse {
        path: path.to_string(),
        source,
    })
}

pub fn load_request(path: &str) -> Result<Request, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_request(&text, path)
}

/// Resolve the bank and queue every boleto.
pub fn build_remessa(request: Request) -> Result<Remessa, CliError> {
    let bank = lookup(&request.bank).ok_or_else(|| CliError::UnknownBank(request.bank.clone()))?;
    tracing::debug!(bank = bank.name(), boletos = request.boletos.len(), "request loaded");
    let mut remessa = Remessa::with_bank(bank, request.config);
    remessa.add_boletos(request.boletos);
    Ok(remessa)
}

/// Write the file, creating missing parent directories.
pub fn write_output(path: &Path, text: &str) -> Result<(), CliError> {
    let write_err = |source| CliError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)
}

/// One line per overwrite that changed content.
pub fn overwrite_report(trace: &RemessaTrace) -> String {
    let mut out = String::new();
    for (record, overwrite) in trace.changed_overwrites() {
        let _ = writeln!(
            out,
            "line {} ({}) cols {}..={}: '{}' -> '{}'",
            record.line,
            record.kind,
            overwrite.start,
            overwrite.end,
            overwrite.previous.trim_end(),
            overwrite.current.trim_end(),
        );
    }
    out
}
