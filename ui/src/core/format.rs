//! Formatting helpers for presenting KPIs. Core values stay raw `f64`s; only
//! the components call into this module.

use super::config::CurrencyLocale;

struct Separators {
    group: char,
    decimal: char,
}

fn separators(locale: CurrencyLocale) -> Separators {
    match locale {
        CurrencyLocale::PtBr => Separators {
            group: '.',
            decimal: ',',
        },
        CurrencyLocale::EnUs => Separators {
            group: ',',
            decimal: '.',
        },
    }
}

/// `R$ 1.234,56` for pt-BR (non-breaking space after the symbol), `$1,234.56`
/// for en-US. Non-finite values render as `-`.
pub fn format_currency(value: f64, locale: CurrencyLocale) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let (negative, digits) = grouped(value, 2, &separators(locale));
    let sign = if negative { "-" } else { "" };
    match locale {
        CurrencyLocale::PtBr => format!("{sign}R$\u{a0}{digits}"),
        CurrencyLocale::EnUs => format!("{sign}${digits}"),
    }
}

pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{value:.2}%")
}

pub fn format_ratio(value: f64) -> String {
    format_number(value, 2)
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{value:.decimals$}")
}

/// Whole-number counts with locale thousands separators.
pub fn format_count(value: f64, locale: CurrencyLocale) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let (negative, digits) = grouped(value, 0, &separators(locale));
    if negative {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Compact axis label: `1.2k`, `3.4M`.
pub fn format_axis(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

fn grouped(value: f64, decimals: usize, separators: &Separators) -> (bool, String) {
    let fixed = format!("{:.decimals$}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separators.group);
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push(separators.decimal);
        out.push_str(frac_part);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    (negative, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brazilian_currency() {
        assert_eq!(
            format_currency(1234.5, CurrencyLocale::PtBr),
            "R$\u{a0}1.234,50"
        );
        assert_eq!(format_currency(0.0, CurrencyLocale::PtBr), "R$\u{a0}0,00");
        assert_eq!(
            format_currency(-1_000_000.0, CurrencyLocale::PtBr),
            "-R$\u{a0}1.000.000,00"
        );
    }

    #[test]
    fn us_currency() {
        assert_eq!(format_currency(1234.567, CurrencyLocale::EnUs), "$1,234.57");
        assert_eq!(format_currency(999.0, CurrencyLocale::EnUs), "$999.00");
    }

    #[test]
    fn tiny_negative_rounds_to_unsigned_zero() {
        assert_eq!(format_currency(-0.001, CurrencyLocale::EnUs), "$0.00");
    }

    #[test]
    fn percent_and_ratio() {
        assert_eq!(format_percent(100.0 / 3.0), "33.33%");
        assert_eq!(format_percent(f64::NAN), "-");
        assert_eq!(format_ratio(4.0 / 3.0), "1.33");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(15.0, CurrencyLocale::PtBr), "15");
        assert_eq!(format_count(12345.0, CurrencyLocale::PtBr), "12.345");
        assert_eq!(format_count(12345.0, CurrencyLocale::EnUs), "12,345");
    }

    #[test]
    fn axis_labels_are_compact() {
        assert_eq!(format_axis(950.0), "950");
        assert_eq!(format_axis(1_500.0), "1.5k");
        assert_eq!(format_axis(2_000_000.0), "2.0M");
    }
}
