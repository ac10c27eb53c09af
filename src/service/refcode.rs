//! Generated pen reference codes: EAN-13-like, 12 random digits plus the
//! GS1 check digit. Uniqueness is enforced by the `pens.ref` constraint;
//! the generator only has to make collisions negligible.

use uuid::Uuid;

pub const REF_LEN: usize = 13;

/// Produce a fresh 13-digit reference code.
pub fn generate() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut digits = [0u8; REF_LEN];
    for d in digits.iter_mut().take(REF_LEN - 1) {
        *d = (entropy % 10) as u8;
        entropy /= 10;
    }
    digits[REF_LEN - 1] = check_digit(&digits[..REF_LEN - 1]);
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// GS1 check digit over the first 12 digits: weights alternate 1,3 from the
/// left, the check digit brings the weighted sum to a multiple of 10.
fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Whether `code` is a well-formed reference (13 digits, valid check digit).
pub fn is_valid(code: &str) -> bool {
    if code.len() != REF_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u8> = code.bytes().map(|b| b - b'0').collect();
    check_digit(&digits[..REF_LEN - 1]) == digits[REF_LEN - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_codes_are_valid_ean13() {
        for _ in 0..100 {
            let code = generate();
            assert_eq!(code.len(), REF_LEN);
            assert!(is_valid(&code), "invalid check digit: {}", code);
        }
    }

    #[test]
    fn generated_codes_are_distinct() {
        let codes: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn known_check_digit() {
        // 400638133393 carries check digit 1 (a published GS1 example).
        let digits: Vec<u8> = "400638133393".bytes().map(|b| b - b'0').collect();
        assert_eq!(check_digit(&digits), 1);
        assert!(is_valid("4006381333931"));
        assert!(!is_valid("4006381333932"));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(!is_valid(""));
        assert!(!is_valid("12345"));
        assert!(!is_valid("40063813339a1"));
    }
}
