//! Phone number checks used before a number is handed to the platform.
//!
//! These are deliberately loose: they count digits and add a country code,
//! nothing more. They are not a telephony-grade validator.

/// Fewest digits accepted (local numbers).
pub const MIN_DIGITS: usize = 7;

/// Most digits accepted (E.164 maximum).
pub const MAX_DIGITS: usize = 15;

/// Country code prepended to bare 10-digit (NANP) numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "1";

fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True when the input holds between 7 and 15 digits, ignoring punctuation.
pub fn validate_number(raw: &str) -> bool {
    (MIN_DIGITS..=MAX_DIGITS).contains(&digits(raw).len())
}

/// Normalize to `+<digits>`, adding the default country code to 10-digit input.
///
/// Does not re-check the length bounds, so input that skipped
/// [`validate_number`] can still come out non-canonical.
pub fn format_number(raw: &str) -> String {
    let cleaned = digits(raw);
    if cleaned.len() == 10 {
        format!("+{}{}", DEFAULT_COUNTRY_CODE, cleaned)
    } else {
        format!("+{}", cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_digit_range() {
        assert!(validate_number("1234567"));
        assert!(validate_number("123456789012345"));
        assert!(validate_number("555-123-4567"));
        assert!(validate_number("+1 (555) 123-4567"));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(!validate_number(""));
        assert!(!validate_number("123456"));
        assert!(!validate_number("12-34-56"));
        assert!(!validate_number("1234567890123456"));
        assert!(!validate_number("call me maybe"));
    }

    #[test]
    fn test_format_ten_digits_gets_country_code() {
        assert_eq!(format_number("555-123-4567"), "+15551234567");
        assert_eq!(format_number("(555) 123 4567"), "+15551234567");
    }

    #[test]
    fn test_format_does_not_duplicate_plus() {
        assert_eq!(format_number("+15551234567"), "+15551234567");
        assert_eq!(format_number("+44 20 7946 0958"), "+442079460958");
    }

    #[test]
    fn test_format_keeps_other_lengths() {
        assert_eq!(format_number("1234567"), "+1234567");
        // No length re-check here
        assert_eq!(format_number("12"), "+12");
    }
}
