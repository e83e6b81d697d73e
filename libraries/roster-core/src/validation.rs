//! Pure validation rules for submitted payloads.
//!
//! Everything here is side-effect free and returns plain booleans or
//! sets; the HTTP layer decides how a failed check maps onto a
//! response.

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Check that a string has a conventional `local@domain.tld` shape.
///
/// Accepts ASCII alphanumerics plus `._%+-` in the local part, ASCII
/// alphanumerics plus `.-` in the domain, and requires a final TLD of
/// at least two ASCII letters.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_char) {
        return false;
    }

    // The domain must carry at least one separator and a real TLD.
    let Some((head, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    if head.is_empty() || !head.chars().all(is_domain_char) {
        return false;
    }

    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Check that a password meets the strength requirement.
///
/// Length only; there is no charset rule.
pub fn is_strong_password(value: &str) -> bool {
    value.len() >= MIN_PASSWORD_LEN
}

/// Return the names whose values are absent or empty.
pub fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect()
}

const fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

const fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conventional_addresses() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(is_valid_email("a_b%c-d@host-1.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("john@.com"));
        assert!(!is_valid_email("john@example.c"));
        assert!(!is_valid_email("john@example.c0m"));
        assert!(!is_valid_email("jo hn@example.com"));
        assert!(!is_valid_email("john@exa mple.com"));
    }

    #[test]
    fn password_length_rule() {
        assert!(!is_strong_password(""));
        assert!(!is_strong_password("short"));
        assert!(!is_strong_password("seven77"));
        assert!(is_strong_password("eight888"));
        assert!(is_strong_password("a much longer passphrase"));
    }

    #[test]
    fn missing_fields_is_a_set_difference() {
        let missing = missing_fields(&[
            ("name", Some("Alice")),
            ("email", Some("")),
            ("password", None),
        ]);
        assert_eq!(missing, vec!["email", "password"]);

        let none_missing = missing_fields(&[("name", Some("Bob"))]);
        assert!(none_missing.is_empty());
    }
}
