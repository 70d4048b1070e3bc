//! Owner identity handling.
//!
//! Pads and tasks are owned by the email address the identity provider
//! reports for the signed-in user. Emails are stored and compared in a
//! normalized form so that `Ada@Example.com` and `ada@example.com` address
//! the same rows.

use crate::error::CoreError;

/// Normalize an owner email: trim surrounding whitespace and lowercase it.
///
/// Rejects values that are not shaped like `local@domain`.
///
/// # Examples
///
/// ```
/// use taskhive_core::identity::normalize_email;
///
/// assert_eq!(normalize_email("  Ada@Example.com ").unwrap(), "ada@example.com");
/// assert!(normalize_email("not-an-email").is_err());
/// ```
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            raw.trim()
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Email address must not contain whitespace".into(),
        ));
    }

    Ok(email)
}

/// Returns `true` when both emails normalize to the same owner.
///
/// Malformed emails never match anything.
pub fn same_owner(a: &str, b: &str) -> bool {
    match (normalize_email(a), normalize_email(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(
            normalize_email(" Grace.Hopper@Navy.MIL\n").unwrap(),
            "grace.hopper@navy.mil"
        );
    }

    #[test]
    fn rejects_missing_at() {
        assert_matches!(normalize_email("grace"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(normalize_email("@navy.mil").is_err());
        assert!(normalize_email("grace@").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn rejects_multiple_at_signs() {
        assert!(normalize_email("a@b@c").is_err());
    }

    #[test]
    fn rejects_inner_whitespace() {
        assert!(normalize_email("grace hopper@navy.mil").is_err());
    }

    #[test]
    fn same_owner_ignores_case() {
        assert!(same_owner("Ada@Example.com", "ada@example.com"));
        assert!(!same_owner("ada@example.com", "bob@example.com"));
    }

    #[test]
    fn same_owner_folds_non_ascii_capitals() {
        assert!(same_owner("Éva@example.com", "éva@example.com"));
        assert!(same_owner(" ÉVA@EXAMPLE.COM ", "éva@example.com"));
    }

    #[test]
    fn malformed_emails_are_never_the_same_owner() {
        assert!(!same_owner("not-an-email", "not-an-email"));
    }
}
