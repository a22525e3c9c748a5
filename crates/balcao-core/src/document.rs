//! # Document Validation Module
//!
//! Check-digit validation for Brazilian fiscal documents: CPF (natural
//! persons, 11 digits) and CNPJ (companies, 14 digits).
//!
//! ## How Check Digits Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CPF: 111.444.777-35            CNPJ: 11.222.333/0001-81                │
//! │       └────┬────┘ └┬┘                 └──────┬──────┘ └┬┘               │
//! │        9 digits    2 check             12 digits       2 check          │
//! │                                                                         │
//! │  Each check digit is a weighted digit-sum modulo 11:                    │
//! │                                                                         │
//! │  CPF digit 1:  weights 10,9,8,...,2 over digits 0..8                    │
//! │  CPF digit 2:  weights 11,10,9,...,2 over digits 0..9                   │
//! │     rem = 11 - (sum % 11); digit = 0 if rem >= 10 else rem              │
//! │                                                                         │
//! │  CNPJ digit 1: weights 5,4,3,2,9,8,7,6,5,4,3,2 over digits 0..11        │
//! │  CNPJ digit 2: weights 6,5,4,3,2,9,8,7,6,5,4,3,2 over digits 0..12      │
//! │     (start high, count down, wrap to 9 after 2)                         │
//! │     rem = sum % 11; digit = 0 if rem < 2 else 11 - rem                  │
//! │                                                                         │
//! │  A single mistyped digit changes the weighted sum, so the check         │
//! │  digits no longer match and the document is rejected.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions accept formatted (`111.444.777-35`) or bare (`11144477735`)
//! input: non-digit characters are stripped before validation. Sequences of
//! one repeated digit (`111.111.111-11`) satisfy the arithmetic but are never
//! real documents, so they are rejected up front.

use std::fmt;

// =============================================================================
// Document Kind
// =============================================================================

/// Which fiscal document a value is expected to be.
///
/// Physical customers carry a CPF, legal (company) customers a CNPJ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Cpf => write!(f, "CPF"),
            DocumentKind::Cnpj => write!(f, "CNPJ"),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a CPF (11 digits) by its two check digits.
///
/// ## Example
/// ```rust
/// use balcao_core::document::is_valid_cpf;
///
/// assert!(is_valid_cpf("111.444.777-35"));
/// assert!(is_valid_cpf("11144477735"));      // formatting optional
/// assert!(!is_valid_cpf("111.444.777-34"));  // wrong check digit
/// assert!(!is_valid_cpf("111.111.111-11"));  // repeated digit
/// ```
pub fn is_valid_cpf(input: &str) -> bool {
    let digits = digit_values(input);
    if digits.len() != 11 || all_identical(&digits) {
        return false;
    }

    let first = cpf_check_digit(&digits[..9]);
    let second = cpf_check_digit(&digits[..10]);

    first == digits[9] && second == digits[10]
}

/// Validates a CNPJ (14 digits) by its two check digits.
///
/// ## Example
/// ```rust
/// use balcao_core::document::is_valid_cnpj;
///
/// assert!(is_valid_cnpj("11.222.333/0001-81"));
/// assert!(!is_valid_cnpj("11.222.333/0001-82")); // wrong check digit
/// ```
pub fn is_valid_cnpj(input: &str) -> bool {
    let digits = digit_values(input);
    if digits.len() != 14 || all_identical(&digits) {
        return false;
    }

    let first = cnpj_check_digit(&digits[..12]);
    let second = cnpj_check_digit(&digits[..13]);

    first == digits[12] && second == digits[13]
}

/// Validates a document against the kind its owner is expected to carry.
pub fn is_valid_document(kind: DocumentKind, input: &str) -> bool {
    match kind {
        DocumentKind::Cpf => is_valid_cpf(input),
        DocumentKind::Cnpj => is_valid_cnpj(input),
    }
}

/// CPF check digit over a digit prefix.
///
/// Weights count down from `len + 1` to 2 (first digit: 10..2 over nine
/// digits; second: 11..2 over ten).
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (start - i as u32))
        .sum();

    let rem = 11 - (sum % 11);
    if rem >= 10 {
        0
    } else {
        rem
    }
}

/// CNPJ check digit over a digit prefix.
///
/// Weights start at `len - 7` (5 for the first digit, 6 for the second),
/// count down to 2, then wrap to 9.
fn cnpj_check_digit(digits: &[u32]) -> u32 {
    let mut weight = digits.len() as u32 - 7;
    let mut sum = 0;
    for &d in digits {
        sum += d * weight;
        weight = if weight == 2 { 9 } else { weight - 1 };
    }

    let rem = sum % 11;
    if rem < 2 {
        0
    } else {
        11 - rem
    }
}

// =============================================================================
// Normalization & Formatting
// =============================================================================

/// Strips everything except ASCII digits.
///
/// Used to compare documents regardless of formatting (uniqueness probes
/// match `123.456.789-00` against `12345678900`).
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats an 11-digit CPF as `000.000.000-00`.
///
/// Input with any other digit count is returned unchanged, mirroring how
/// the UI leaves half-typed values alone.
pub fn format_cpf(input: &str) -> String {
    let d = digits(input);
    if d.len() != 11 {
        return input.to_string();
    }
    format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
}

/// Formats a 14-digit CNPJ as `00.000.000/0000-00`.
///
/// Input with any other digit count is returned unchanged.
pub fn format_cnpj(input: &str) -> String {
    let d = digits(input);
    if d.len() != 14 {
        return input.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    )
}

fn digit_values(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_identical(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("529.982.247-25"));
    }

    #[test]
    fn test_cpf_mutated_check_digit_fails() {
        assert!(is_valid_cpf("111.444.777-35"));
        assert!(!is_valid_cpf("111.444.777-34"));
        assert!(!is_valid_cpf("111.444.777-45"));
    }

    #[test]
    fn test_cpf_repeated_digits_rejected() {
        // These satisfy the check-digit arithmetic but are not real documents
        for d in 0..=9 {
            let cpf: String = std::iter::repeat(char::from(b'0' + d)).take(11).collect();
            assert!(!is_valid_cpf(&cpf), "repeated {} accepted", d);
        }
    }

    #[test]
    fn test_cpf_length_mismatch_rejected() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("1114447773"));
        assert!(!is_valid_cpf("111444777350"));
        assert!(!is_valid_cpf("abc"));
    }

    #[test]
    fn test_valid_cnpj() {
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("12.345.678/0001-95"));
    }

    #[test]
    fn test_cnpj_mutated_check_digit_fails() {
        assert!(!is_valid_cnpj("11.222.333/0001-82"));
        assert!(!is_valid_cnpj("11.222.333/0001-71"));
    }

    #[test]
    fn test_cnpj_repeated_digits_rejected() {
        assert!(!is_valid_cnpj("00000000000000"));
        assert!(!is_valid_cnpj("11111111111111"));
    }

    #[test]
    fn test_demo_documents_are_not_all_valid() {
        // The development dataset intentionally ships placeholder documents
        assert!(!is_valid_cpf("123.456.789-00"));
        assert!(!is_valid_cnpj("12.345.678/0001-90"));
    }

    #[test]
    fn test_kind_dispatch() {
        assert!(is_valid_document(DocumentKind::Cpf, "111.444.777-35"));
        assert!(!is_valid_document(DocumentKind::Cnpj, "111.444.777-35"));
        assert!(is_valid_document(DocumentKind::Cnpj, "11.222.333/0001-81"));
        assert!(!is_valid_document(DocumentKind::Cpf, "11.222.333/0001-81"));
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits("111.444.777-35"), "11144477735");
        assert_eq!(digits("(11) 98765-4321"), "11987654321");
        assert_eq!(digits("abc"), "");
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("11144477735"), "111.444.777-35");
        assert_eq!(format_cpf("111.444.777-35"), "111.444.777-35");
        // Unexpected digit counts pass through untouched
        assert_eq!(format_cpf("123"), "123");
    }

    #[test]
    fn test_format_cnpj() {
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("11.222.333/0001-81"), "11.222.333/0001-81");
        assert_eq!(format_cnpj("123"), "123");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DocumentKind::Cpf.to_string(), "CPF");
        assert_eq!(DocumentKind::Cnpj.to_string(), "CNPJ");
    }
}
