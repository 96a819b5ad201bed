//! Field Normalization and Format Rules
//!
//! Normalization always runs before validation, and the normalized value is
//! what gets sent downstream. The raw input stays in the session draft for
//! re-display.

/// Strip spaces and dashes from a sort code
pub fn normalize_sort_code(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Sort codes are exactly six digits after normalization
pub fn is_valid_sort_code(normalized: &str) -> bool {
    normalized.len() == 6 && normalized.chars().all(|c| c.is_ascii_digit())
}

/// Strip spaces and dashes from an account number
pub fn normalize_account_number(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Account numbers are six to eight digits after normalization
pub fn is_valid_account_number(normalized: &str) -> bool {
    (6..=8).contains(&normalized.len()) && normalized.chars().all(|c| c.is_ascii_digit())
}

/// Uppercase and strip spaces from a VAT number
pub fn normalize_vat_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// UK VAT formats: GB + 9 or 12 digits, or GBGD/GBHA + 3 digits
pub fn is_valid_vat_number(normalized: &str) -> bool {
    if let Some(rest) = normalized
        .strip_prefix("GBGD")
        .or_else(|| normalized.strip_prefix("GBHA"))
    {
        return rest.len() == 3 && rest.chars().all(|c| c.is_ascii_digit());
    }
    if let Some(rest) = normalized.strip_prefix("GB") {
        return (rest.len() == 9 || rest.len() == 12)
            && rest.chars().all(|c| c.is_ascii_digit());
    }
    false
}

/// Strip spaces, dashes and parentheses from a telephone number
pub fn normalize_telephone_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Telephone numbers: optional leading `+`, then 9–15 digits
pub fn is_valid_telephone_number(normalized: &str) -> bool {
    let digits = normalized.strip_prefix('+').unwrap_or(normalized);
    (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Uppercase and strip spaces from a company registration number
pub fn normalize_company_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Companies House numbers: 8 digits, or 2 letters followed by 6 digits
pub fn is_valid_company_number(normalized: &str) -> bool {
    if normalized.len() != 8 {
        return false;
    }
    let all_digits = normalized.chars().all(|c| c.is_ascii_digit());
    let prefixed = normalized[..2].chars().all(|c| c.is_ascii_alphabetic())
        && normalized[2..].chars().all(|c| c.is_ascii_digit());
    all_digits || prefixed
}

/// Minimal email shape check: one `@` with non-empty sides
pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        _ => false,
    }
}
