//! Check-digit functions consumed by the bank layouts.
//!
//! Layouts never compute check digits inline; they call these pure
//! functions and render the resulting character.

/// Modulo-11 check character.
///
/// Digits are weighted from the right with `2, 3, ..., max_weight` (cycling).
/// The result is `(sum * 10) % 11`; a result of 10 yields `on_ten`.
/// Non-digit characters in `number` are ignored.
pub fn modulo11(number: &str, max_weight: u32, on_ten: char) -> char {
    let sum: u32 = number
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .zip((2..=max_weight).cycle())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match (sum * 10) % 11 {
        10 => on_ten,
        d => char::from_digit(d, 10).unwrap_or(on_ten),
    }
}

/// Bradesco checking-account check digit (weights 2..7, remainder 10 -> `P`).
pub fn bradesco_account(account: &str) -> char {
    modulo11(account, 7, 'P')
}

/// Bradesco "nosso número" check digit over the 2-digit wallet followed by
/// the 11-digit number.
pub fn bradesco_our_number(wallet: &str, number: u64) -> char {
    let wallet: String = wallet.chars().filter(char::is_ascii_digit).collect();
    modulo11(&format!("{wallet:0>2}{number:011}"), 7, 'P')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bradesco_our_number_reference() {
        // Worked example from the Bradesco collection manual.
        assert_eq!(bradesco_our_number("19", 2), '8');
    }

    #[test]
    fn test_bradesco_account() {
        // 5*2 + 4*3 + 3*4 + 2*5 + 1*6 = 50; 50 % 11 = 6; 11 - 6 = 5
        assert_eq!(bradesco_account("12345"), '5');
        assert_eq!(bradesco_account("1"), '9');
    }

    #[test]
    fn test_modulo11_remainder_zero() {
        // 5*2 + 4*3 = 22, a multiple of 11
        assert_eq!(modulo11("45", 7, 'P'), '0');
    }

    #[test]
    fn test_modulo11_remainder_one_maps_to_on_ten() {
        // 6 * 2 = 12; 12 % 11 = 1 -> (12 * 10) % 11 = 10
        assert_eq!(modulo11("6", 7, 'P'), 'P');
        assert_eq!(modulo11("6", 7, '0'), '0');
    }

    #[test]
    fn test_modulo11_ignores_punctuation() {
        assert_eq!(modulo11("1.2-3.4/5", 7, 'P'), bradesco_account("12345"));
    }
}
