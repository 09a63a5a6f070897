//! Beneficiary account configuration for one remittance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::boleto::Person;

/// Account and file settings shared by every record of a remittance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemessaConfig {
    pub agency: String,
    pub account: String,
    /// Account check digit; computed by the bank's algorithm when absent.
    #[serde(default)]
    pub account_check_digit: Option<String>,
    /// Wallet ("carteira") the beneficiary registers boletos under.
    pub wallet: String,
    /// Bank-assigned client code; derived from the account when absent.
    #[serde(default)]
    pub client_code: Option<String>,
    pub beneficiary: Person,
    /// Sequential remittance number ("id remessa").
    #[serde(default)]
    pub file_sequence: Option<u32>,
    pub remittance_date: NaiveDate,
    /// Overrides the bank's record separator.
    #[serde(default)]
    pub line_terminator: Option<String>,
    /// Overrides the bank's end-of-file terminator; `""` disables it.
    #[serde(default)]
    pub file_terminator: Option<String>,
}

impl RemessaConfig {
    pub fn new(
        agency: impl Into<String>,
        account: impl Into<String>,
        wallet: impl Into<String>,
        beneficiary: Person,
        remittance_date: NaiveDate,
    ) -> Self {
        Self {
            agency: agency.into(),
            account: account.into(),
            account_check_digit: None,
            wallet: wallet.into(),
            client_code: None,
            beneficiary,
            file_sequence: None,
            remittance_date,
            line_terminator: None,
            file_terminator: None,
        }
    }

    pub fn with_file_sequence(mut self, sequence: u32) -> Self {
        self.file_sequence = Some(sequence);
        self
    }

    pub fn with_account_check_digit(mut self, digit: impl Into<String>) -> Self {
        self.account_check_digit = Some(digit.into());
        self
    }

    pub fn with_client_code(mut self, code: impl Into<String>) -> Self {
        self.client_code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_config_defaults() {
        let json = r#"{
            "agency": "1234",
            "account": "0012345",
            "wallet": "09",
            "beneficiary": { "name": "ACME Comercio Ltda", "document": "12345678000190" },
            "file_sequence": 7,
            "remittance_date": "2024-01-05"
        }"#;
        let config: RemessaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.file_sequence, Some(7));
        assert_eq!(config.account_check_digit, None);
        assert_eq!(config.line_terminator, None);
        assert_eq!(
            config.remittance_date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_builders() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let config = RemessaConfig::new("1234", "12345", "09", Person::default(), date)
            .with_file_sequence(3)
            .with_account_check_digit("5")
            .with_client_code("42");
        assert_eq!(config.file_sequence, Some(3));
        assert_eq!(config.account_check_digit.as_deref(), Some("5"));
        assert_eq!(config.client_code.as_deref(), Some("42"));
    }
}
