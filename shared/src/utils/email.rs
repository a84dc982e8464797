//! Email address utilities

/// Top-level domains accepted at signup
pub const ALLOWED_TLDS: [&str; 2] = ["com", "net"];

/// Normalize an email address the way it is stored: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check that the address ends in one of [`ALLOWED_TLDS`]
pub fn has_allowed_tld(email: &str) -> bool {
    email
        .trim()
        .rsplit_once('.')
        .map(|(_, tld)| ALLOWED_TLDS.iter().any(|allowed| tld.eq_ignore_ascii_case(allowed)))
        .unwrap_or(false)
}

/// Compare two addresses after normalization
pub fn same_address(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}

/// Mask an email address for logging (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_has_allowed_tld() {
        assert!(has_allowed_tld("a@b.com"));
        assert!(has_allowed_tld("a@b.NET"));
        assert!(!has_allowed_tld("a@b.org"));
        assert!(!has_allowed_tld("a@b"));
    }

    #[test]
    fn test_same_address() {
        assert!(same_address("A@B.com", " a@b.com"));
        assert!(!same_address("a@b.com", "a@c.com"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }
}
