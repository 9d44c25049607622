//! Transaction id (txid) helpers.

use rand::Rng;

use crate::error::{PixResult, ValidationError};
use crate::utils::constants::{TXID_CHARSET, TXID_MAX_LENGTH, TXID_MIN_LENGTH};

/// Constraint reported when a txid is rejected.
pub const TXID_CONSTRAINT: &str = "Must be 26-35 alphanumeric characters";

/// Constraint reported when a requested txid length is out of range.
pub const TXID_LENGTH_CONSTRAINT: &str = "txid length must be between 26 and 35";

/// Generate a random txid of the maximum length (35).
pub fn generate_txid() -> String {
    random_txid(TXID_MAX_LENGTH)
}

/// Generate a random alphanumeric txid of `length` characters.
///
/// Lengths outside 26..=35 are rejected.
pub fn generate_txid_with_length(length: usize) -> PixResult<String> {
    if !(TXID_MIN_LENGTH..=TXID_MAX_LENGTH).contains(&length) {
        return Err(ValidationError::new("length", TXID_LENGTH_CONSTRAINT)
            .with_hint(format!("Requested {} characters.", length))
            .into());
    }
    Ok(random_txid(length))
}

fn random_txid(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| TXID_CHARSET[rng.gen_range(0..TXID_CHARSET.len())] as char)
        .collect()
}

/// Check a txid: 26 to 35 ASCII letters or digits.
pub fn is_valid_txid(txid: &str) -> bool {
    (TXID_MIN_LENGTH..=TXID_MAX_LENGTH).contains(&txid.len())
        && txid.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Fail with a validation error unless the txid is well formed.
pub fn ensure_txid(txid: &str) -> PixResult<()> {
    if is_valid_txid(txid) {
        Ok(())
    } else {
        Err(ValidationError::new("txid", TXID_CONSTRAINT)
            .with_hint("Use generate_txid() or supply 26 to 35 characters from [a-zA-Z0-9].")
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PixError;

    #[test]
    fn test_generated_txids_are_valid() {
        for _ in 0..50 {
            let txid = generate_txid();
            assert_eq!(txid.len(), 35);
            assert!(is_valid_txid(&txid));
        }
        assert_eq!(generate_txid_with_length(26).unwrap().len(), 26);
        assert_eq!(generate_txid_with_length(35).unwrap().len(), 35);
    }

    #[test]
    fn test_txid_length_out_of_range() {
        for length in [0, 25, 36, 99] {
            match generate_txid_with_length(length).unwrap_err() {
                PixError::Validation(e) => {
                    assert_eq!(e.field, "length");
                    assert_eq!(e.constraint, TXID_LENGTH_CONSTRAINT);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_txid_bounds() {
        assert!(is_valid_txid(&"a".repeat(26)));
        assert!(is_valid_txid(&"Z".repeat(35)));
        assert!(!is_valid_txid(&"a".repeat(25)));
        assert!(!is_valid_txid(&"a".repeat(36)));
        assert!(!is_valid_txid("abcdefghijklmnopqrstuvwxy-"));
        assert!(!is_valid_txid("ábcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn test_ensure_txid_error() {
        let err = ensure_txid("short").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains(TXID_CONSTRAINT));
    }
}
