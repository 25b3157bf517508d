// src/utils.rs
use chrono::prelude::*;
use crate::calc::CalculationKind;

/// Two decimals with `,` thousands separators, e.g. `-1,234,567.89`.
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Only signal negative when something nonzero survived rounding.
    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Result formatting for the live result panel.
pub fn format_live_result(kind: CalculationKind, value: f64) -> String {
    if kind.is_percentage() {
        format!("{:.2}%", value)
    } else {
        format_grouped(value)
    }
}

/// Result formatting for saved history rows.
pub fn format_saved_result(kind: CalculationKind, value: f64) -> String {
    if kind.is_percentage() {
        format!("{:.2}%", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn format_local_time(epoch_millis: i64) -> String {
    Local.timestamp_millis_opt(epoch_millis)
        .earliest()
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0.0), "0.00");
        assert_eq!(format_grouped(100.0), "100.00");
        assert_eq!(format_grouped(1000.0), "1,000.00");
        assert_eq!(format_grouped(1234567.891), "1,234,567.89");
        assert_eq!(format_grouped(-98765.4), "-98,765.40");
        assert_eq!(format_grouped(-0.001), "0.00");
    }

    #[test]
    fn test_result_formats_per_kind() {
        assert_eq!(format_live_result(CalculationKind::Cvss, 97.0 / 0.97), "100.00");
        assert_eq!(format_live_result(CalculationKind::Vrl, 11.1111), "11.11%");
        assert_eq!(format_saved_result(CalculationKind::Cvss, 12345.678), "12345.68");
        assert_eq!(format_saved_result(CalculationKind::Ip, 25.0), "25.00%");
    }

    #[test]
    fn test_local_time_shape() {
        let formatted = format_local_time(1_700_000_000_000);
        assert_eq!(formatted.len(), 8);
        assert_eq!(formatted.matches(':').count(), 2);
    }
}
