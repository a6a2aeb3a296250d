//! Display helpers: raw catalog tokens to human labels, naira price rendering.

/// Word spellings the generic title-case rule gets wrong. Checked after
/// underscore-splitting, so `mazda_cx5` hits the `cx5` entry.
const WORD_FIXUPS: &[(&str, &str)] = &[
    ("bmw", "BMW"),
    ("crv", "CR-V"),
    ("cx5", "CX-5"),
    ("mercedes-benz", "Mercedes-Benz"),
    ("rav4", "RAV4"),
    ("suv", "SUV"),
];

/// Turns an underscore-separated catalog token into a display label:
/// `foreign_used` -> "Foreign Used", `mazda_cx5` -> "Mazda CX-5".
pub fn humanize_token(token: &str) -> String {
    token
        .split('_')
        .map(humanize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn humanize_word(word: &str) -> String {
    if let Some((_, fixed)) = WORD_FIXUPS.iter().find(|(raw, _)| *raw == word) {
        return (*fixed).to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Renders a predicted price in naira with thousands grouping. The fraction
/// is shown only when non-integral, to two places with trailing zeros
/// trimmed: 1500000.0 -> "₦1,500,000", 1234.5 -> "₦1,234.5".
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    if fraction == 0 {
        format!("₦{sign}{whole}")
    } else {
        let fraction = format!("{fraction:02}");
        let fraction = fraction.trim_end_matches('0');
        format!("₦{sign}{whole}.{fraction}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
