/// Currency glyph used when an invoice carries none of its own.
pub const DEFAULT_CURRENCY: &str = "€";

/// Render an amount the way the dashboard displays money: currency glyph,
/// period-grouped thousands, comma decimal separator, two fraction digits
/// (`€ 1.234,50`).
pub fn format_currency(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return format!("{currency} 0,00");
    }

    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{currency} {sign}{grouped},{fraction:02}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grouping_and_decimal() {
        assert_eq!(format_currency(1234.5, "€"), "€ 1.234,50");
        assert_eq!(format_currency(1_000_000.0, "€"), "€ 1.000.000,00");
        assert_eq!(format_currency(999.99, "€"), "€ 999,99");
    }

    #[test]
    fn small_amounts() {
        assert_eq!(format_currency(0.0, "€"), "€ 0,00");
        assert_eq!(format_currency(0.005, "€"), "€ 0,01");
        assert_eq!(format_currency(7.0, "$"), "$ 7,00");
    }

    #[test]
    fn negative_amounts() {
        assert_eq!(format_currency(-1234.5, "€"), "€ -1.234,50");
    }

    #[test]
    fn non_finite_falls_back_to_zero() {
        assert_eq!(format_currency(f64::NAN, "€"), "€ 0,00");
        assert_eq!(format_currency(f64::INFINITY, "€"), "€ 0,00");
    }
}
