//! Document, PIX key and amount validators.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const EVP_PATTERN: &str = r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";
const PHONE_PATTERN: &str = r"^\+55\d{10,11}$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const MONETARY_PATTERN: &str = r"^\d+\.\d{2}$";

static EVP_RE: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_RE: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();
static MONETARY_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, input: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .map(|re| re.is_match(input))
        .unwrap_or(false)
}

fn digits(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Validate a CPF (11 digits, punctuation ignored) by its check digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let d = digits(cpf);
    if d.len() != 11 || all_same(&d) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = d[..len]
            .iter()
            .enumerate()
            .map(|(i, v)| v * (len as u32 + 1 - i as u32))
            .sum();
        let remainder = (sum * 10) % 11;
        if remainder == 10 {
            0
        } else {
            remainder
        }
    };

    check(9) == d[9] && check(10) == d[10]
}

/// Validate a CNPJ (14 digits, punctuation ignored) by its check digits.
pub fn is_valid_cnpj(cnpj: &str) -> bool {
    const WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    let d = digits(cnpj);
    if d.len() != 14 || all_same(&d) {
        return false;
    }

    let check = |weights: &[u32]| -> u32 {
        let sum: u32 = weights.iter().zip(&d).map(|(w, v)| w * v).sum();
        let remainder = sum % 11;
        if remainder < 2 {
            0
        } else {
            11 - remainder
        }
    };

    check(&WEIGHTS_1) == d[12] && check(&WEIGHTS_2) == d[13]
}

/// Kind of a PIX key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixKeyType {
    Cpf,
    Cnpj,
    Email,
    Phone,
    Evp,
}

impl PixKeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Evp => "evp",
        }
    }
}

impl fmt::Display for PixKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the kind of a PIX key.
///
/// Checked in order: EVP (UUID), phone (`+55` and 10 or 11 digits), email,
/// CPF, CNPJ. Document keys must be bare digits with valid check digits.
pub fn detect_pix_key_type(key: &str) -> Option<PixKeyType> {
    if matches(&EVP_RE, EVP_PATTERN, key) {
        return Some(PixKeyType::Evp);
    }
    if matches(&PHONE_RE, PHONE_PATTERN, key) {
        return Some(PixKeyType::Phone);
    }
    if matches(&EMAIL_RE, EMAIL_PATTERN, key) {
        return Some(PixKeyType::Email);
    }

    let bare_digits = !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit());
    if bare_digits && key.len() == 11 && is_valid_cpf(key) {
        return Some(PixKeyType::Cpf);
    }
    if bare_digits && key.len() == 14 && is_valid_cnpj(key) {
        return Some(PixKeyType::Cnpj);
    }

    None
}

pub fn is_valid_pix_key(key: &str) -> bool {
    detect_pix_key_type(key).is_some()
}

/// Check a decimal amount string such as `"10.50"`.
pub fn is_valid_monetary_value(value: &str) -> bool {
    matches(&MONETARY_RE, MONETARY_PATTERN, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(!is_valid_cpf("52998224724"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("123"));
    }

    #[test]
    fn test_cnpj() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("00000000000000"));
    }

    #[test]
    fn test_detect_pix_key_type() {
        assert_eq!(
            detect_pix_key_type("123e4567-e89b-42d3-a456-426614174000"),
            Some(PixKeyType::Evp)
        );
        assert_eq!(
            detect_pix_key_type("123E4567-E89B-42D3-A456-426614174000"),
            Some(PixKeyType::Evp)
        );
        assert_eq!(detect_pix_key_type("+5551999998888"), Some(PixKeyType::Phone));
        assert_eq!(detect_pix_key_type("+555199998888"), Some(PixKeyType::Phone));
        assert_eq!(detect_pix_key_type("pix@empresa.com.br"), Some(PixKeyType::Email));
        assert_eq!(detect_pix_key_type("52998224725"), Some(PixKeyType::Cpf));
        assert_eq!(detect_pix_key_type("11222333000181"), Some(PixKeyType::Cnpj));

        assert_eq!(detect_pix_key_type("529.982.247-25"), None);
        assert_eq!(detect_pix_key_type("+1555123456"), None);
        assert_eq!(detect_pix_key_type("not a key"), None);
        assert!(!is_valid_pix_key(""));
    }

    #[test]
    fn test_monetary_value() {
        assert!(is_valid_monetary_value("0.01"));
        assert!(is_valid_monetary_value("1500.00"));
        assert!(!is_valid_monetary_value("10"));
        assert!(!is_valid_monetary_value("10.5"));
        assert!(!is_valid_monetary_value("10,50"));
        assert!(!is_valid_monetary_value("-1.00"));
    }
}
