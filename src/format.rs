//! Text normalizers shared by the field renderers and the bank layouts.
//!
//! CNAB400 files are plain ASCII: alphanumeric content is upper-cased and
//! stripped of accents, dates are `ddmmyy`, and tax identifiers and postal
//! codes travel as bare digits.

use chrono::NaiveDate;

/// Keep only the ASCII digits of `s` (`"12.345.678/0001-90"` -> `"12345678000190"`).
pub fn only_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Keep only the ASCII letters and digits of `s` (`"0009-0123/P"` -> `"00090123P"`).
pub fn only_alphanumeric(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Render a date as the 6-character `ddmmyy` form used throughout CNAB400.
pub fn date_ddmmyy(date: NaiveDate) -> String {
    date.format("%d%m%y").to_string()
}

/// Upper-case `s` and fold it into printable ASCII.
///
/// Accented Latin-1 letters become their base letter; control characters and
/// any other non-ASCII character become a space. The result is pure ASCII,
/// so its `len()` is its column count.
pub fn normalize_alpha(s: &str) -> String {
    s.chars()
        .flat_map(char::to_uppercase)
        .map(fold_char)
        .collect()
}

fn fold_char(c: char) -> char {
    match c {
        ' '..='~' => c,
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        'Ý' => 'Y',
        'ª' => 'A',
        'º' => 'O',
        _ => ' ',
    }
}
