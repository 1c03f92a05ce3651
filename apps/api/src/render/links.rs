//! Link normalization for the preview and the exported PDF.
//!
//! Rules: a bare value without a scheme gets an `https://` prefix, email
//! addresses become `mailto:` targets, phone numbers become `tel:` targets,
//! and blank input normalizes to no link at all.

/// Normalizes a user-entered URL. `None` means "no link".
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains("://") || trimmed.starts_with("mailto:") || trimmed.starts_with("tel:") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

/// Turns an email address into a `mailto:` target.
pub fn mailto_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("mailto:{trimmed}"))
    }
}

/// Turns a phone number into a `tel:` target, stripping interior whitespace.
pub fn tel_link(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(format!("tel:{cleaned}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_https_prefix() {
        assert_eq!(
            normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_existing_scheme_is_unchanged() {
        assert_eq!(
            normalize_url("https://example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_url("http://example.com/a?b=c"),
            Some("http://example.com/a?b=c".to_string())
        );
    }

    #[test]
    fn test_blank_input_is_no_link() {
        assert_eq!(normalize_url(""), None);
        assert_eq!(normalize_url("   "), None);
        assert_eq!(mailto_link(" "), None);
        assert_eq!(tel_link("\t"), None);
    }

    #[test]
    fn test_mailto_and_tel_targets() {
        assert_eq!(
            mailto_link(" asha@example.com "),
            Some("mailto:asha@example.com".to_string())
        );
        assert_eq!(
            tel_link("+1 555 010 2030"),
            Some("tel:+15550102030".to_string())
        );
    }
}
