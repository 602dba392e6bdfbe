use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Role to store for a new user: the payload's choice, else the configured
/// default (the patient role on a seeded database).
pub(crate) fn resolve_role(requested: Option<i32>, default_role_id: i32) -> i32 {
    requested.unwrap_or(default_role_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.ec"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn role_defaults_when_absent() {
        assert_eq!(resolve_role(None, 3), 3);
        assert_eq!(resolve_role(Some(1), 3), 1);
    }
}
