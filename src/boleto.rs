//! Boleto value objects.
//!
//! A [`Boleto`] carries everything a bank layout needs to encode one
//! collection instruction. It is plain data: parsing and validation of the
//! business document happen before it reaches the encoder.
//!
//! Boletos deserialize from JSON; optional attributes may be omitted:
//!
//! ```json
//! {
//!   "due_date": "2024-01-10",
//!   "document_date": "2024-01-02",
//!   "document_number": "NF-1001",
//!   "our_number": 1001,
//!   "value": "150.00",
//!   "wallet": "09",
//!   "payer": { "name": "Maria da Silva", "document": "123.456.789-09" }
//! }
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::only_digits;

/// A payer, beneficiary or guarantor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    /// CPF (11 digits) or CNPJ (14 digits), punctuation allowed.
    pub document: String,
    pub address: String,
    pub district: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

impl Person {
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            ..Self::default()
        }
    }

    /// Tax identifier with punctuation removed.
    pub fn document_digits(&self) -> String {
        only_digits(&self.document)
    }

    /// True when the tax identifier is a CNPJ (legal entity).
    pub fn is_legal_entity(&self) -> bool {
        self.document_digits().len() == 14
    }
}

/// Lifecycle status of a boleto within a remittance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// New registration.
    #[default]
    Registration,
    /// Request to write the boleto off.
    WriteOff,
    /// Due date change together with other fields.
    Alteration,
    /// Due date change only.
    DueDateChange,
    /// Bank-specific command code sent verbatim.
    Custom(String),
}

/// Document species ("espécie do título").
///
/// Each bank maps species to its own two-digit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Species {
    /// Duplicata mercantil.
    #[default]
    #[serde(rename = "DM")]
    Duplicata,
    /// Nota promissória.
    #[serde(rename = "NP")]
    NotaPromissoria,
    /// Nota de seguro.
    #[serde(rename = "NS")]
    NotaSeguro,
    /// Cobrança seriada.
    #[serde(rename = "CS")]
    CobrancaSeriada,
    /// Recibo.
    #[serde(rename = "REC")]
    Recibo,
    /// Letra de câmbio.
    #[serde(rename = "LC")]
    LetraCambio,
    /// Nota de débito.
    #[serde(rename = "ND")]
    NotaDebito,
    /// Duplicata de serviço.
    #[serde(rename = "DS")]
    DuplicataServico,
    #[serde(rename = "OUTROS")]
    Outros,
}

/// One collection instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Boleto {
    pub due_date: NaiveDate,
    pub document_date: NaiveDate,
    /// Beneficiary's own document number ("seu número").
    pub document_number: String,
    /// Bank-side identifier ("nosso número"), without check digit.
    pub our_number: u64,
    /// Free-form control number echoed back in return files.
    #[serde(default)]
    pub control_number: String,
    pub value: Decimal,
    pub wallet: String,
    #[serde(default)]
    pub species: Species,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub discount_date: Option<NaiveDate>,
    /// Penalty percentage charged after the due date.
    #[serde(default)]
    pub penalty: Decimal,
    /// Late fee charged per day.
    #[serde(default)]
    pub daily_interest: Decimal,
    #[serde(default)]
    pub protest_days: Option<u32>,
    #[serde(default)]
    pub write_off_days: Option<u32>,
    pub payer: Person,
    /// Co-signer ("sacador avalista").
    #[serde(default)]
    pub guarantor: Option<Person>,
    /// Electronic invoice access key (NF-e, 44 digits).
    #[serde(default)]
    pub invoice_key: Option<String>,
    #[serde(default)]
    pub status: Status,
}

impl Boleto {
    /// The invoice key digits, if a non-empty key is present.
    pub fn invoice_key_digits(&self) -> Option<String> {
        self.invoice_key
            .as_deref()
            .map(only_digits)
            .filter(|digits| !digits.is_empty())
    }

    /// Protest days when set and positive.
    pub fn protest(&self) -> Option<u32> {
        self.protest_days.filter(|&days| days > 0)
    }

    /// Automatic write-off days when set and positive.
    pub fn automatic_write_off(&self) -> Option<u32> {
        self.write_off_days.filter(|&days| days > 0)
    }
}
