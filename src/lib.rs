//! # cnab400-rs
//!
//! A CNAB400 remittance file encoder for Brazilian bank collection slips
//! ("boletos").
//!
//! CNAB400 files are fixed-width text: every line is a 400-column record
//! (longer when a bank appends an extension segment), and every field lives
//! at a column range published by the bank.
//!
//! ## Overview
//!
//! - **Records**: [`Record`] is one line, written by 1-based inclusive
//!   column ranges
//! - **Fields**: [`Field`] renders numbers, identifiers, text and dates with
//!   the format's padding rules
//! - **Layouts**: [`Layout`] is an ordered list of column writes; later
//!   writes overwrite earlier ones
//! - **Banks**: [`Bank`] builds the header, detail and trailer layouts
//! - **Documents**: [`Remessa`] numbers the records and joins the lines
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use cnab400_rs::{Boleto, Bradesco, Person, Remessa, RemessaConfig};
//! use rust_decimal::Decimal;
//!
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//!
//! let config = RemessaConfig::new(
//!     "1234",
//!     "12345",
//!     "09",
//!     Person::new("ACME Comercio Ltda", "12.345.678/0001-90"),
//!     date(2024, 1, 5),
//! )
//! .with_file_sequence(1);
//!
//! let mut remessa = Remessa::new(Bradesco, config);
//! remessa.add_boleto(Boleto {
//!     due_date: date(2024, 1, 10),
//!     document_date: date(2024, 1, 2),
//!     document_number: "NF-1001".to_string(),
//!     our_number: 1001,
//!     value: Decimal::new(15000, 2),
//!     wallet: "09".to_string(),
//!     payer: Person::new("Maria da Silva", "123.456.789-09"),
//!     ..Boleto::default()
//! });
//!
//! let text = remessa.generate().unwrap();
//! let lines: Vec<&str> = text.lines().collect();
//! assert_eq!(lines.len(), 3);
//! assert!(lines.iter().all(|line| line.len() == 400));
//! assert!(lines[2].ends_with("000003"));
//! ```

pub mod bank;
pub mod boleto;
pub mod check_digit;
pub mod config;
pub mod error;
pub mod executor;
pub mod field;
pub mod format;
pub mod layout;
pub mod record;
pub mod remessa;
pub mod trace;

pub use bank::{Bank, Bradesco, lookup};
pub use boleto::{Boleto, Person, Species, Status};
pub use config::RemessaConfig;
pub use error::{RangeError, RemessaError};
pub use executor::{execute, execute_traced};
pub use field::Field;
pub use layout::{Instruction, Layout, RecordKind};
pub use record::{RECORD_WIDTH, Record};
pub use remessa::Remessa;
pub use trace::{LayoutTrace, Overwrite, RemessaTrace, WriteTrace};
