//! Bank-specific CNAB400 layouts.
//!
//! Every bank shares the 400-column skeleton (one header, detail records,
//! one trailer) but places its fields differently. A [`Bank`] builds the
//! [`Layout`] for each record kind; the [`Remessa`](crate::Remessa) executes
//! those layouts and stitches the lines together.

pub mod bradesco;

pub use bradesco::Bradesco;

use crate::boleto::Boleto;
use crate::config::RemessaConfig;
use crate::error::RemessaError;
use crate::layout::Layout;

/// A bank's CNAB400 remittance layout.
///
/// Implementations are stateless tables; the same value may build layouts
/// for any number of documents, on any thread.
pub trait Bank: Send + Sync {
    /// Three-digit bank code ("237").
    fn code(&self) -> &'static str;

    /// Upper-case bank name as written in the header.
    fn name(&self) -> &'static str;

    /// Wallet codes the bank accepts, two digits each.
    fn wallets(&self) -> &'static [&'static str];

    /// Separator written after every record but the last.
    fn line_terminator(&self) -> &'static str {
        "\r\n"
    }

    /// Written after the last record; empty for none.
    fn file_terminator(&self) -> &'static str {
        "\r\n"
    }

    /// Check the configuration fields this bank requires.
    fn check_required(&self, _config: &RemessaConfig) -> Result<(), RemessaError> {
        Ok(())
    }

    /// Fail unless `wallet` is one of [`Bank::wallets`].
    ///
    /// Single-digit codes are compared zero padded, so `"9"` matches `"09"`.
    fn check_wallet(&self, wallet: &str) -> Result<(), RemessaError> {
        let padded = format!("{:0>2}", wallet.trim());
        if self.wallets().contains(&padded.as_str()) {
            Ok(())
        } else {
            Err(RemessaError::UnsupportedWallet {
                bank: self.name(),
                wallet: wallet.to_string(),
                supported: self.wallets(),
            })
        }
    }

    /// Header layout. The header is always record number 1.
    fn header(&self, config: &RemessaConfig) -> Result<Layout, RemessaError>;

    /// Detail layout for `boleto`, stamped with its own 1-based record
    /// number `sequence`.
    fn detail(
        &self,
        config: &RemessaConfig,
        boleto: &Boleto,
        sequence: u32,
    ) -> Result<Layout, RemessaError>;

    /// Trailer layout carrying the file's total record count.
    fn trailer(&self, config: &RemessaConfig, total_records: u32) -> Result<Layout, RemessaError>;
}

/// Find a supported bank by code (`"237"`) or name (`"bradesco"`).
pub fn lookup(name_or_code: &str) -> Option<Box<dyn Bank>> {
    let key = name_or_code.trim();
    if key == bradesco::BANK_CODE || key.eq_ignore_ascii_case(bradesco::BANK_NAME) {
        return Some(Box::new(Bradesco));
    }
    None
}
