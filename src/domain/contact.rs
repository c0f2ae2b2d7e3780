/// Cleans a stored phone number for display: keeps digits, parentheses,
/// dots, hyphens and spaces, collapses runs of whitespace, and returns an
/// empty string when no digit is left.
pub fn sanitize_phone(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let kept: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '(' | ')' | '.' | '-') || c.is_whitespace())
        .collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    if !collapsed.chars().any(|c| c.is_ascii_digit()) {
        return String::new();
    }
    collapsed
}

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Landlines have 10 digits with area code, mobiles 11.
pub fn is_valid_phone(raw: &str) -> bool {
    (10..=11).contains(&digits_only(raw).len())
}
