//! Field validators for the signup and login forms
//!
//! Every validator is a pure predicate. Turning a failure into an
//! error flag and a hint is the caller's job (see `FieldErrors`).

use regex::Regex;
use std::sync::LazyLock;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern compiles"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .expect("email pattern compiles")
});

/// Inclusive longitude range in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Inclusive latitude range in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;

/// 3 to 20 word characters, no surrounding whitespace
pub fn validate_username(s: &str) -> bool {
    let len = s.chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
        && USERNAME_RE.is_match(s)
        && s.trim() == s
}

/// `local@domain.label[.label...]`; dot-less domains such as
/// `user@localhost` are rejected.
pub fn validate_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// At least 8 characters with an uppercase letter, a lowercase letter,
/// a digit and a symbol (anything outside `[A-Za-z0-9_]`).
pub fn validate_password(s: &str) -> bool {
    s.chars().count() >= PASSWORD_MIN_LEN
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_lowercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(is_symbol)
}

/// Byte-for-byte equality, case sensitive
pub fn validate_confirm_password(confirm: &str, password: &str) -> bool {
    confirm == password
}

/// A defined, finite number inside `[min, max]`
pub fn validate_coordinate(value: Option<f64>, min: f64, max: f64) -> bool {
    match value {
        Some(v) => v.is_finite() && (min..=max).contains(&v),
        None => false,
    }
}

pub fn validate_longitude(value: Option<f64>) -> bool {
    validate_coordinate(value, LONGITUDE_RANGE.0, LONGITUDE_RANGE.1)
}

pub fn validate_latitude(value: Option<f64>) -> bool {
    validate_coordinate(value, LATITUDE_RANGE.0, LATITUDE_RANGE.1)
}

pub(crate) fn is_symbol(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod username {
        use super::*;

        #[test]
        fn test_accepts_word_characters() {
            assert!(validate_username("abc_123"));
            assert!(validate_username("validuser"));
            assert!(validate_username("___"));
        }

        #[test]
        fn test_length_bounds() {
            assert!(!validate_username("ab"));
            assert!(validate_username("abc"));
            assert!(validate_username(&"a".repeat(20)));
            assert!(!validate_username(&"a".repeat(21)));
        }

        #[test]
        fn test_rejects_whitespace_and_symbols() {
            assert!(!validate_username(" abc"));
            assert!(!validate_username("abc "));
            assert!(!validate_username("ab cd"));
            assert!(!validate_username("abc-def"));
            assert!(!validate_username("abc!"));
            assert!(!validate_username(""));
        }

        #[test]
        fn test_rejects_non_ascii_letters() {
            assert!(!validate_username("jürgen"));
        }
    }

    mod email {
        use super::*;

        #[test]
        fn test_accepts_common_addresses() {
            assert!(validate_email("user@example.com"));
            assert!(validate_email("first.last+tag@sub.example.co"));
            assert!(validate_email("a@b.c"));
        }

        #[test]
        fn test_rejects_malformed_addresses() {
            assert!(!validate_email("nodomain"));
            assert!(!validate_email("a@b"));
            assert!(!validate_email("user@localhost"));
            assert!(!validate_email("@example.com"));
            assert!(!validate_email("user@.com"));
            assert!(!validate_email("user@example."));
            assert!(!validate_email("user@@example.com"));
            assert!(!validate_email("user name@example.com"));
            assert!(!validate_email(""));
        }
    }

    mod password {
        use super::*;

        #[test]
        fn test_accepts_strong_password() {
            assert!(validate_password("Abcdef1!"));
            assert!(validate_password("S3cure#Passw0rd"));
        }

        #[test]
        fn test_rejects_each_missing_class() {
            assert!(!validate_password("alllowercase1!"));
            assert!(!validate_password("ALLUPPERCASE1!"));
            assert!(!validate_password("NoDigitsHere!"));
            assert!(!validate_password("NoSymbols123"));
            assert!(!validate_password("Ab1!"));
        }

        #[test]
        fn test_underscore_is_not_a_symbol() {
            assert!(!validate_password("Abcdef1_"));
            assert!(validate_password("Abcdef1 "));
        }
    }

    mod confirm_password {
        use super::*;

        #[test]
        fn test_exact_match_only() {
            assert!(validate_confirm_password("Abcdef1!", "Abcdef1!"));
            assert!(!validate_confirm_password("Abcdef1!", "abcdef1!"));
            assert!(!validate_confirm_password("Abcdef1! ", "Abcdef1!"));
            assert!(!validate_confirm_password("", "Abcdef1!"));
        }
    }

    mod coordinate {
        use super::*;

        #[test]
        fn test_range_checks() {
            assert!(!validate_coordinate(Some(200.0), -180.0, 180.0));
            assert!(validate_coordinate(Some(45.5), -90.0, 90.0));
            assert!(validate_coordinate(Some(-180.0), -180.0, 180.0));
            assert!(validate_coordinate(Some(180.0), -180.0, 180.0));
            assert!(!validate_coordinate(Some(-90.01), -90.0, 90.0));
        }

        #[test]
        fn test_rejects_unset_and_non_finite() {
            assert!(!validate_coordinate(None, -90.0, 90.0));
            assert!(!validate_coordinate(Some(f64::NAN), -90.0, 90.0));
            assert!(!validate_coordinate(Some(f64::INFINITY), -90.0, 90.0));
        }

        #[test]
        fn test_named_ranges() {
            assert!(validate_longitude(Some(150.0)));
            assert!(!validate_latitude(Some(150.0)));
            assert!(validate_latitude(Some(-33.9)));
        }
    }

    proptest! {
        #[test]
        fn prop_short_or_long_usernames_fail(s in "[A-Za-z0-9_]{0,2}|[A-Za-z0-9_]{21,40}") {
            prop_assert!(!validate_username(&s));
        }

        #[test]
        fn prop_usernames_with_foreign_chars_fail(
            prefix in "[A-Za-z0-9_]{1,8}",
            bad in "[^A-Za-z0-9_]",
            suffix in "[A-Za-z0-9_]{1,8}",
        ) {
            let s = format!("{prefix}{bad}{suffix}");
            prop_assert!(!validate_username(&s));
        }

        #[test]
        fn prop_padded_usernames_fail(core in "[A-Za-z0-9_]{3,18}") {
            let padded = format!(" {core}");
            prop_assert!(!validate_username(&padded));
            let padded = format!("{core}\t");
            prop_assert!(!validate_username(&padded));
        }

        #[test]
        fn prop_lowercase_only_passwords_fail(s in "[a-z0-9!@#]{8,32}") {
            prop_assert!(!validate_password(&s));
        }

        #[test]
        fn prop_out_of_range_longitudes_fail(v in 180.0001f64..1.0e6) {
            prop_assert!(!validate_longitude(Some(v)));
            prop_assert!(!validate_longitude(Some(-v)));
        }
    }
}
