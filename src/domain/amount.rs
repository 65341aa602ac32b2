// src/domain/amount.rs

/// Coerces a money or size cell into a number.
///
/// Spreadsheet exports carry values like `"$450,000"`, `"Rs. 50,000"` or `"4,50,000/-"`.
/// The first number in the text is read: anything before its first digit is a currency
/// prefix, commas inside it are grouping separators, and it ends at the first character
/// that can't continue it. A `-` in the prefix makes it negative. Text without a digit
/// coerces to `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let Some(start) = raw.find(|c: char| c.is_ascii_digit()) else {
        return 0.0;
    };
    let negative = raw[..start].contains('-');

    let mut number = String::new();
    if negative {
        number.push('-');
    }

    let mut chars = raw[start..].chars().peekable();
    let mut seen_point = false;
    while let Some(c) = chars.next() {
        match c {
            '0'..='9' => number.push(c),
            ',' if chars.peek().is_some_and(char::is_ascii_digit) => {}
            '.' if !seen_point && chars.peek().is_some_and(char::is_ascii_digit) => {
                seen_point = true;
                number.push('.');
            }
            _ => break,
        }
    }

    match number.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}
