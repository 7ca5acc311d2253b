//! Text formatting for money, percentages and week counts.

/// US dollars with thousands separators and no cents, e.g. `$1,235`.
pub fn currency(value: f64) -> String {
    dollars(value, 0)
}

/// US dollars with cents, e.g. `$86.54`.
pub fn currency_detailed(value: f64) -> String {
    dollars(value, 2)
}

/// Percentage with the given precision, `N/A` when undefined.
pub fn percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.decimals$}%"),
        _ => "N/A".to_string(),
    }
}

/// Week count without a trailing `.0`, e.g. `4w` or `2.5w`.
pub fn weeks(value: f64) -> String {
    format!("{value}w")
}

fn dollars(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let fixed = format!("{:.decimals$}", value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{sign}${grouped}.{fraction}"),
        None => format!("{sign}${grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(999.0), "$999");
        assert_eq!(currency(1000.0), "$1,000");
        assert_eq!(currency(400_000.0), "$400,000");
        assert_eq!(currency(1_234_567.2), "$1,234,567");
    }

    #[test]
    fn detailed_keeps_cents() {
        assert_eq!(currency_detailed(86.538_461), "$86.54");
        assert_eq!(currency_detailed(17_307.692), "$17,307.69");
    }

    #[test]
    fn negatives_get_a_leading_minus() {
        assert_eq!(currency(-1234.0), "-$1,234");
        assert_eq!(currency(-0.2), "$0");
    }

    #[test]
    fn undefined_percent_is_not_available() {
        assert_eq!(percent(None, 2), "N/A");
        assert_eq!(percent(Some(f64::NAN), 1), "N/A");
        assert_eq!(percent(Some(7.692_307), 2), "7.69%");
        assert_eq!(percent(Some(7.692_307), 1), "7.7%");
    }

    #[test]
    fn weeks_drop_trailing_zero() {
        assert_eq!(weeks(4.0), "4w");
        assert_eq!(weeks(2.5), "2.5w");
    }
}
