use crate::utils::error::{ReportError, Result};
use url::Url;

/// Checks a raw domain string before any scoring or service call happens.
/// Failures here are fatal to the request, never retried.
pub fn validate_domain(raw: &str) -> Result<()> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ReportError::validation("Domain name is required"));
    }

    if trimmed.contains(char::is_whitespace) {
        return Err(ReportError::validation(format!(
            "Domain '{}' must not contain whitespace",
            trimmed
        )));
    }

    let name = trimmed.split('.').next().unwrap_or_default();
    if name.is_empty() {
        return Err(ReportError::validation(format!(
            "Domain '{}' has an empty name part",
            trimmed
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !valid_chars {
        return Err(ReportError::validation(format!(
            "Domain '{}' contains invalid characters",
            trimmed
        )));
    }

    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReportError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReportError::validation(format!(
                "{}: unsupported URL scheme: {}",
                field_name, scheme
            ))),
        },
        Err(e) => Err(ReportError::validation(format!(
            "{}: invalid URL format: {}",
            field_name, e
        ))),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportError::validation(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domains() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain("my-site.io").is_ok());
        assert!(validate_domain("nodot").is_ok());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(validate_domain("").is_err());
        assert!(validate_domain("   ").is_err());
        assert!(validate_domain("two words.com").is_err());
        assert!(validate_domain(".com").is_err());
        assert!(validate_domain("bad_char.com").is_err());
    }

    #[test]
    fn url_validation_requires_http_scheme() {
        assert!(validate_url("api_base_url", "https://api.example.com/v1").is_ok());
        assert!(validate_url("api_base_url", "ftp://api.example.com").is_err());
        assert!(validate_url("api_base_url", "").is_err());
    }
}
