//! Banco Bradesco (237) CNAB400 remittance layout.
//!
//! Column positions follow Bradesco's "Cobrança Bradesco - Layout de
//! Arquivo Remessa CNAB400". Detail records grow to 444 columns when the
//! boleto carries an electronic invoice key.

use rust_decimal::Decimal;

use crate::bank::Bank;
use crate::boleto::{Boleto, Species, Status};
use crate::check_digit;
use crate::config::RemessaConfig;
use crate::error::RemessaError;
use crate::field::Field;
use crate::format::{only_alphanumeric, only_digits};
use crate::layout::{Layout, RecordKind};

pub const BANK_CODE: &str = "237";
pub const BANK_NAME: &str = "BRADESCO";

/// Wallets Bradesco accepts for registered collection.
pub const WALLETS: &[&str] = &["02", "04", "09", "28"];

/// Width of a detail record carrying an invoice key.
pub const EXTENDED_WIDTH: usize = 444;

/// Occurrence codes ("identificação da ocorrência"), detail columns 109-110.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    Registration,
    WriteOffRequest,
    RebateGrant,
    RebateCancel,
    DueDateChange,
    ParticipantControlChange,
    DocumentNumberChange,
    ProtestRequest,
    StopProtestAndWriteOff,
    StopProtestAndKeep,
    CreditAssignmentTransfer,
    WalletTransfer,
    WalletTransferReturn,
    OtherDataChange,
    AutoDebitUnschedule,
    CreditSplitAdjustment,
    CreditSplitCancel,
}

impl Occurrence {
    pub fn code(&self) -> &'static str {
        match self {
            Occurrence::Registration => "01",
            Occurrence::WriteOffRequest => "02",
            Occurrence::RebateGrant => "04",
            Occurrence::RebateCancel => "05",
            Occurrence::DueDateChange => "06",
            Occurrence::ParticipantControlChange => "07",
            Occurrence::DocumentNumberChange => "08",
            Occurrence::ProtestRequest => "09",
            Occurrence::StopProtestAndWriteOff => "18",
            Occurrence::StopProtestAndKeep => "19",
            Occurrence::CreditAssignmentTransfer => "22",
            Occurrence::WalletTransfer => "23",
            Occurrence::WalletTransferReturn => "24",
            Occurrence::OtherDataChange => "31",
            Occurrence::AutoDebitUnschedule => "35",
            Occurrence::CreditSplitAdjustment => "68",
            Occurrence::CreditSplitCancel => "69",
        }
    }
}

/// Collection instructions ("instruções"), detail columns 157-158.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionInstruction {
    None,
    ProtestFamiliar,
    Protest,
    NoInterest,
    NoPaymentAfterDue,
    Penalty10After4Days,
    NoPaymentAfter8Days,
    ChargesAfter5Days,
    ChargesAfter10Days,
    ChargesAfter15Days,
    DiscountAfterDue,
    ReturnAfterDays,
}

impl CollectionInstruction {
    pub fn code(&self) -> &'static str {
        match self {
            CollectionInstruction::None => "00",
            CollectionInstruction::ProtestFamiliar => "05",
            CollectionInstruction::Protest => "06",
            CollectionInstruction::NoInterest => "08",
            CollectionInstruction::NoPaymentAfterDue => "09",
            CollectionInstruction::Penalty10After4Days => "10",
            CollectionInstruction::NoPaymentAfter8Days => "11",
            CollectionInstruction::ChargesAfter5Days => "12",
            CollectionInstruction::ChargesAfter10Days => "13",
            CollectionInstruction::ChargesAfter15Days => "14",
            CollectionInstruction::DiscountAfterDue => "15",
            CollectionInstruction::ReturnAfterDays => "18",
        }
    }
}

/// Bradesco species code ("espécie do título"), detail columns 148-149.
pub fn species_code(species: Species) -> &'static str {
    match species {
        Species::Duplicata => "01",
        Species::NotaPromissoria => "02",
        Species::NotaSeguro => "03",
        Species::CobrancaSeriada => "04",
        Species::Recibo => "05",
        Species::LetraCambio => "10",
        Species::NotaDebito => "11",
        Species::DuplicataServico => "12",
        Species::Outros => "99",
    }
}

/// Occurrence for a boleto status, or `None` for a custom command.
pub fn occurrence_for(status: &Status) -> Option<Occurrence> {
    match status {
        Status::Registration => Some(Occurrence::Registration),
        Status::WriteOff => Some(Occurrence::WriteOffRequest),
        Status::Alteration | Status::DueDateChange => Some(Occurrence::DueDateChange),
        Status::Custom(_) => None,
    }
}

/// Custom command for the 2-column occurrence field: at most two characters,
/// written unchanged and right aligned.
fn custom_occurrence(command: &str) -> Field {
    Field::code(command.chars().take(2).collect::<String>())
}

/// Account check digit: the configured one, or Bradesco's modulo 11.
fn account_check_digit(config: &RemessaConfig) -> String {
    match &config.account_check_digit {
        Some(digit) => digit.clone(),
        None => check_digit::bradesco_account(&config.account).to_string(),
    }
}

/// Bradesco CNAB400 layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bradesco;

impl Bank for Bradesco {
    fn code(&self) -> &'static str {
        BANK_CODE
    }

    fn name(&self) -> &'static str {
        BANK_NAME
    }

    fn wallets(&self) -> &'static [&'static str] {
        WALLETS
    }

    fn check_required(&self, config: &RemessaConfig) -> Result<(), RemessaError> {
        let required = [
            ("agency", config.agency.trim().is_empty()),
            ("account", config.account.trim().is_empty()),
            ("beneficiary", config.beneficiary.name.trim().is_empty()),
            ("file_sequence", config.file_sequence.is_none()),
        ];
        match required.into_iter().find(|(_, missing)| *missing) {
            Some((field, _)) => Err(RemessaError::MissingRequiredField { field }),
            None => Ok(()),
        }
    }

    fn header(&self, config: &RemessaConfig) -> Result<Layout, RemessaError> {
        let file_sequence = config
            .file_sequence
            .ok_or(RemessaError::MissingRequiredField {
                field: "file_sequence",
            })?;

        let mut layout = Layout::new(RecordKind::Header);
        layout
            .put(1, 1, "0")
            .put(2, 2, "1")
            .put(3, 9, "REMESSA")
            .put(10, 11, "01")
            .put(12, 26, Field::alpha("COBRANCA"));

        // Client code: 000 + wallet(4) + agency(5) + account(7) + DV(1)
        match &config.client_code {
            Some(code) => {
                layout.put(27, 46, Field::digits(only_alphanumeric(code)));
            }
            None => {
                layout
                    .put(27, 29, "000")
                    .put(30, 33, Field::digits(only_digits(&config.wallet)))
                    .put(34, 38, Field::digits(only_digits(&config.agency)))
                    .put(39, 45, Field::digits(only_digits(&config.account)))
                    .put(46, 46, Field::digits(account_check_digit(config)));
            }
        }

        layout
            .put(47, 76, Field::alpha(config.beneficiary.name.as_str()))
            .put(77, 79, BANK_CODE)
            .put(80, 94, Field::alpha("Bradesco"))
            .put(95, 100, config.remittance_date)
            .put(101, 108, Field::Blank)
            .put(109, 110, "MX")
            .put(111, 117, Field::number(file_sequence))
            .put(118, 394, Field::Blank)
            .put(395, 400, Field::number(1u32));

        Ok(layout)
    }

    fn detail(
        &self,
        config: &RemessaConfig,
        boleto: &Boleto,
        sequence: u32,
    ) -> Result<Layout, RemessaError> {
        let invoice_key = boleto.invoice_key_digits();
        let mut layout = Layout::new(RecordKind::Detail);
        if invoice_key.is_some() {
            layout.extend(EXTENDED_WIDTH);
        }

        // Automatic debit block (unused): zeros, column 7 and 20 reserved
        layout
            .put(1, 1, "1")
            .put(2, 6, "00000")
            .put(7, 7, Field::Blank)
            .put(8, 19, "000000000000")
            .put(20, 20, Field::Blank)
            .put(21, 21, "0")
            .put(22, 24, Field::digits(only_digits(&config.wallet)))
            .put(25, 29, Field::digits(only_digits(&config.agency)))
            .put(30, 36, Field::digits(only_digits(&config.account)))
            .put(37, 37, Field::digits(account_check_digit(config)))
            .put(38, 62, Field::alpha(boleto.control_number.as_str()))
            .put(63, 65, "000");

        let has_penalty = boleto.penalty > Decimal::ZERO;
        layout
            .put(66, 66, if has_penalty { "2" } else { "0" })
            .put(67, 70, Field::amount(boleto.penalty));

        let our_number_dv = check_digit::bradesco_our_number(&boleto.wallet, boleto.our_number);
        layout
            .put(
                71,
                82,
                Field::digits(format!("{:011}{}", boleto.our_number, our_number_dv)),
            )
            .put(83, 92, Field::amount(Decimal::ZERO))
            // 2 = beneficiary issues the slip, bank only registers it
            .put(93, 93, "2")
            .put(94, 94, "N")
            .put(95, 104, Field::Blank)
            .put(105, 105, Field::Blank)
            // 2 = no debit notice
            .put(106, 106, "2")
            .put(107, 108, Field::Blank);

        layout.put(109, 110, Occurrence::Registration.code());
        if let Status::Custom(command) = &boleto.status {
            layout.put(109, 110, custom_occurrence(command));
        } else if let Some(occurrence) = occurrence_for(&boleto.status)
            && occurrence != Occurrence::Registration
        {
            layout.put(109, 110, occurrence.code());
        }

        layout
            .put(111, 120, Field::alpha(boleto.document_number.as_str()))
            .put(121, 126, boleto.due_date)
            .put(127, 139, Field::amount(boleto.value))
            .put(140, 142, "000")
            .put(143, 147, "00000")
            .put(148, 149, species_code(boleto.species))
            .put(150, 150, "N")
            .put(151, 156, boleto.document_date);

        layout
            .put(157, 158, CollectionInstruction::None.code())
            .put(159, 160, CollectionInstruction::None.code());
        if let Some(days) = boleto.protest() {
            layout
                .put(157, 158, CollectionInstruction::Protest.code())
                .put(159, 160, Field::number(days));
        } else if let Some(days) = boleto.automatic_write_off() {
            layout
                .put(157, 158, CollectionInstruction::ReturnAfterDays.code())
                .put(159, 160, Field::number(days));
        }

        layout.put(161, 173, Field::amount(boleto.daily_interest));
        if boleto.discount > Decimal::ZERO {
            let date = boleto
                .discount_date
                .ok_or(RemessaError::MissingRequiredField {
                    field: "discount_date",
                })?;
            layout.put(174, 179, date);
        } else {
            layout.put(174, 179, "000000");
        }

        let payer = &boleto.payer;
        layout
            .put(180, 192, Field::amount(boleto.discount))
            // IOF and rebate
            .put(193, 205, Field::amount(Decimal::ZERO))
            .put(206, 218, Field::amount(Decimal::ZERO))
            .put(219, 220, if payer.is_legal_entity() { "02" } else { "01" })
            .put(221, 234, Field::digits(payer.document_digits()))
            .put(235, 274, Field::alpha(payer.name.as_str()))
            .put(275, 314, Field::alpha(payer.address.as_str()))
            .put(315, 326, Field::alpha(payer.district.as_str()))
            .put(327, 334, Field::digits(only_digits(&payer.postal_code)))
            .put(
                335,
                394,
                Field::alpha(
                    boleto
                        .guarantor
                        .as_ref()
                        .map(|g| g.name.as_str())
                        .unwrap_or_default(),
                ),
            )
            .put(395, 400, Field::number(sequence));

        // Bradesco prints this notice over the guarantor columns; it is
        // written last, so it replaces columns 336-376 of the guarantor name.
        layout.put(336, 376, "DEPOSITOS NAO SERAO ACEITOS COMO QUITACAO");

        if let Some(key) = invoice_key {
            layout.put(401, EXTENDED_WIDTH, Field::digits(key));
        }

        Ok(layout)
    }

    fn trailer(&self, _config: &RemessaConfig, total_records: u32) -> Result<Layout, RemessaError> {
        let mut layout = Layout::new(RecordKind::Trailer);
        layout
            .put(1, 1, "9")
            .put(2, 394, Field::Blank)
            .put(395, 400, Field::number(total_records));
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boleto::Person;
    use crate::executor::execute;
    use crate::record::Record;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> RemessaConfig {
        RemessaConfig::new(
            "1234",
            "12345",
            "09",
            Person::new("ACME Comércio Ltda", "12.345.678/0001-90"),
            date(2024, 1, 5),
        )
        .with_file_sequence(7)
    }

    fn boleto() -> Boleto {
        Boleto {
            due_date: date(2024, 1, 10),
            document_date: date(2024, 1, 2),
            document_number: "NF-1001".to_string(),
            our_number: 2,
            value: Decimal::new(15000, 2),
            wallet: "09".to_string(),
            payer: Person {
                name: "Maria da Silva".to_string(),
                document: "123.456.789-09".to_string(),
                address: "Rua das Flores, 10".to_string(),
                district: "Centro".to_string(),
                postal_code: "01310-100".to_string(),
                ..Person::default()
            },
            ..Boleto::default()
        }
    }

    fn detail(boleto: &Boleto) -> Record {
        execute(&Bradesco.detail(&config(), boleto, 2).unwrap()).unwrap()
    }

    #[test]
    fn test_header_columns() {
        let record = execute(&Bradesco.header(&config()).unwrap()).unwrap();
        assert_eq!(record.width(), 400);
        assert_eq!(record.columns(1, 26), Some("01REMESSA01COBRANCA       "));
        // 000 + 0009 + 01234 + 0012345 + DV 5
        assert_eq!(record.columns(27, 46), Some("00000090123400123455"));
        assert_eq!(record.columns(47, 76), Some("ACME COMERCIO LTDA            "));
        assert_eq!(record.columns(77, 94), Some("237BRADESCO       "));
        assert_eq!(record.columns(95, 100), Some("050124"));
        assert_eq!(record.columns(109, 117), Some("MX0000007"));
        assert_eq!(record.columns(395, 400), Some("000001"));
    }

    #[test]
    fn test_header_client_code_override() {
        let config = config().with_client_code("4321");
        let record = execute(&Bradesco.header(&config).unwrap()).unwrap();
        assert_eq!(record.columns(27, 46), Some("00000000000000004321"));
    }

    #[test]
    fn test_header_client_code_override_keeps_check_letter() {
        let mut config = config();
        config.account = "0000006".to_string();
        let computed = execute(&Bradesco.header(&config).unwrap()).unwrap();
        let code = computed.columns(27, 46).unwrap().to_string();
        assert!(code.ends_with('P'));

        let config = config.with_client_code(code.as_str());
        let overridden = execute(&Bradesco.header(&config).unwrap()).unwrap();
        assert_eq!(overridden.columns(27, 46), Some(code.as_str()));
    }

    #[test]
    fn test_header_client_code_override_drops_punctuation() {
        let config = config().with_client_code("0009-01234/0012345-p");
        let record = execute(&Bradesco.header(&config).unwrap()).unwrap();
        assert_eq!(record.columns(27, 46), Some("0000009012340012345P"));
    }

    #[test]
    fn test_required_account_fields() {
        let cases: [(fn(&mut RemessaConfig), &str); 3] = [
            (|c| c.agency = " ".to_string(), "agency"),
            (|c| c.account = String::new(), "account"),
            (|c| c.beneficiary.name = String::new(), "beneficiary"),
        ];
        for (clear, field) in cases {
            let mut config = config();
            clear(&mut config);
            assert_eq!(
                Bradesco.check_required(&config),
                Err(RemessaError::MissingRequiredField { field })
            );
        }
        assert_eq!(Bradesco.check_required(&config()), Ok(()));
    }

    #[test]
    fn test_header_requires_file_sequence() {
        let mut config = config();
        config.file_sequence = None;
        assert_eq!(
            Bradesco.header(&config).unwrap_err(),
            RemessaError::MissingRequiredField {
                field: "file_sequence"
            }
        );
        assert!(Bradesco.check_required(&config).is_err());
    }

    #[test]
    fn test_detail_standard_columns() {
        let record = detail(&boleto());
        assert_eq!(record.width(), 400);
        assert_eq!(record.columns(1, 21), Some("100000 000000000000 0"));
        assert_eq!(record.columns(22, 37), Some("0090123400123455"));
        assert_eq!(record.columns(66, 70), Some("00000"));
        // our number 00000000002 with DV over wallet 09
        let dv = check_digit::bradesco_our_number("09", 2);
        assert_eq!(record.columns(71, 82), Some(format!("00000000002{dv}").as_str()));
        assert_eq!(record.columns(109, 110), Some("01"));
        assert_eq!(record.columns(111, 120), Some("NF-1001   "));
        assert_eq!(record.columns(121, 126), Some("100124"));
        assert_eq!(record.columns(127, 139), Some("0000000015000"));
        assert_eq!(record.columns(148, 156), Some("01N020124"));
        assert_eq!(record.columns(157, 160), Some("0000"));
        assert_eq!(record.columns(174, 179), Some("000000"));
        assert_eq!(record.columns(219, 234), Some("0100012345678909"));
        assert_eq!(record.columns(327, 334), Some("01310100"));
        assert_eq!(record.columns(395, 400), Some("000002"));
    }

    #[test]
    fn test_detail_notice_overwrites_guarantor() {
        let mut boleto = boleto();
        boleto.guarantor = Some(Person::new("Avalista Garantidor SA", "11222333000181"));
        let record = detail(&boleto);
        assert_eq!(record.columns(335, 335), Some("A"));
        assert_eq!(
            record.columns(336, 376),
            Some("DEPOSITOS NAO SERAO ACEITOS COMO QUITACAO")
        );
        assert_eq!(record.columns(377, 394), Some(" ".repeat(18).as_str()));
    }

    #[test]
    fn test_status_to_occurrence() {
        let cases = [
            (Status::Registration, "01"),
            (Status::WriteOff, "02"),
            (Status::Alteration, "06"),
            (Status::DueDateChange, "06"),
            (Status::Custom("31".to_string()), "31"),
            (Status::Custom("7".to_string()), " 7"),
            (Status::Custom("123".to_string()), "12"),
            (Status::Custom("ab".to_string()), "ab"),
        ];
        for (status, expected) in cases {
            let mut boleto = boleto();
            boleto.status = status.clone();
            assert_eq!(
                detail(&boleto).columns(109, 110),
                Some(expected),
                "status {status:?}"
            );
        }
    }

    #[test]
    fn test_protest_wins_over_write_off() {
        let mut boleto = boleto();
        boleto.protest_days = Some(5);
        boleto.write_off_days = Some(10);
        assert_eq!(detail(&boleto).columns(157, 160), Some("0605"));
    }

    #[test]
    fn test_write_off_when_no_protest() {
        let mut boleto = boleto();
        boleto.protest_days = Some(0);
        boleto.write_off_days = Some(10);
        assert_eq!(detail(&boleto).columns(157, 160), Some("1810"));
    }

    #[test]
    fn test_protest_days_overflow() {
        let mut boleto = boleto();
        boleto.protest_days = Some(120);
        let layout = Bradesco.detail(&config(), &boleto, 2).unwrap();
        assert!(execute(&layout).is_err());
    }

    #[test]
    fn test_discount_renders_date_and_amount() {
        let mut boleto = boleto();
        boleto.discount = Decimal::new(1050, 2);
        boleto.discount_date = Some(date(2024, 1, 8));
        let record = detail(&boleto);
        assert_eq!(record.columns(174, 179), Some("080124"));
        assert_eq!(record.columns(180, 192), Some("0000000001050"));
    }

    #[test]
    fn test_discount_without_date_is_missing_field() {
        let mut boleto = boleto();
        boleto.discount = Decimal::new(1050, 2);
        assert_eq!(
            Bradesco.detail(&config(), &boleto, 2).unwrap_err(),
            RemessaError::MissingRequiredField {
                field: "discount_date"
            }
        );
    }

    #[test]
    fn test_penalty_flag_and_percentage() {
        let mut boleto = boleto();
        boleto.penalty = Decimal::new(200, 2); // 2.00%
        boleto.daily_interest = Decimal::new(15, 2);
        let record = detail(&boleto);
        assert_eq!(record.columns(66, 70), Some("20200"));
        assert_eq!(record.columns(161, 173), Some("0000000000015"));
    }

    #[test]
    fn test_legal_entity_payer() {
        let mut boleto = boleto();
        boleto.payer.document = "12.345.678/0001-90".to_string();
        assert_eq!(detail(&boleto).columns(219, 234), Some("0212345678000190"));
    }

    #[test]
    fn test_invoice_key_extends_detail() {
        let mut boleto = boleto();
        boleto.invoice_key =
            Some("3524 0112 3456 7800 0190 5500 1000 0012 3410 0012 3456".to_string());
        let record = detail(&boleto);
        assert_eq!(record.width(), EXTENDED_WIDTH);
        assert_eq!(
            record.columns(401, 444),
            Some("35240112345678000190550010000012341000123456")
        );
    }

    #[test]
    fn test_short_invoice_key_is_zero_padded() {
        let mut boleto = boleto();
        boleto.invoice_key = Some("123".to_string());
        let record = detail(&boleto);
        assert_eq!(record.columns(401, 444), Some(format!("{:0>44}", "123").as_str()));
    }

    #[test]
    fn test_species_codes() {
        assert_eq!(species_code(Species::Duplicata), "01");
        assert_eq!(species_code(Species::LetraCambio), "10");
        assert_eq!(species_code(Species::Outros), "99");
    }

    #[test]
    fn test_trailer() {
        let record = execute(&Bradesco.trailer(&config(), 3).unwrap()).unwrap();
        assert!(record.as_str().starts_with('9'));
        assert_eq!(record.columns(2, 394), Some(" ".repeat(393).as_str()));
        assert_eq!(record.columns(395, 400), Some("000003"));
    }
}
