use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// International number as typed by a customer: a leading `+`, then digits
/// optionally grouped by spaces, dots, dashes or parentheses.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9 ().-]*[0-9]$").expect("valid phone pattern"));

const MIN_DIGITS: usize = 8;
// E.164
const MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid phone number")]
pub struct InvalidPhoneNumber;

/// A phone number normalized to E.164 (`+` followed by digits only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = InvalidPhoneNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !PHONE_PATTERN.is_match(s) {
            return Err(InvalidPhoneNumber);
        }
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(InvalidPhoneNumber);
        }
        Ok(PhoneNumber(format!("+{digits}")))
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_separators() {
        let phone: PhoneNumber = " +7 (912) 345-67-89 ".parse().unwrap();
        assert_eq!(phone.as_str(), "+79123456789");
    }

    #[test]
    fn test_parse_e164() {
        let phone: PhoneNumber = "+15555550123".parse().unwrap();
        assert_eq!(phone.to_string(), "+15555550123");
    }

    #[test]
    fn test_rejects_implausible_numbers() {
        for input in [
            "",
            "15555550123",
            "+",
            "+0123456789",
            "+1234",
            "+1234567890123456",
            "+1555555012a",
            "call me",
        ] {
            assert_eq!(input.parse::<PhoneNumber>(), Err(InvalidPhoneNumber), "{input}");
        }
    }
}
