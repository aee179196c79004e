use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Optional leading +, then 7–20 digits with common separators.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-()]{6,19}$").expect("phone regex"));

/// Trim and strip control characters and angle brackets from free-form
/// user input before it is validated or stored.
pub fn sanitize_input(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !c.is_control() && *c != '<' && *c != '>')
        .collect()
}

pub fn validate_name(name: &str) -> bool {
    (2..=50).contains(&name.chars().count())
}

pub fn validate_email(email: &str) -> bool {
    email.len() <= 100 && EMAIL_RE.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
