use std::cmp::Ordering;

use itertools::Itertools;

pub trait Sign {
    fn sign(&self) -> Ordering;
}

impl Sign for f64 {
    fn sign(&self) -> Ordering {
        self.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    }
}

/// Insert `,` between groups of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let head = digits.len() % 3;
    let mut groups = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    groups.extend(
        digits.as_bytes()[head..]
            .chunks(3)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok()),
    );
    groups.into_iter().join(",")
}

/// Human readable market capitalization
/// Example: 2500000000 → $2.50B, 12345 → $12,345
pub fn format_market_cap(market_cap: f64) -> String {
    if market_cap >= 1e12 {
        format!("${:.2}T", market_cap / 1e12)
    } else if market_cap >= 1e9 {
        format!("${:.2}B", market_cap / 1e9)
    } else if market_cap >= 1e6 {
        format!("${:.2}M", market_cap / 1e6)
    } else if market_cap > 0.0 {
        #[allow(clippy::cast_sign_loss)]
        let whole = market_cap.round() as u64;
        format!("${}", group_thousands(whole))
    } else {
        "$0".to_string()
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}

pub fn format_volume(volume: u64) -> String {
    group_thousands(volume)
}

/// Short volume label for chart axes
/// Example: 1234567 → 1.23M
pub fn format_axis_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.2}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.2}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.2}K", volume / 1e3)
    } else {
        format!("{volume:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_cap_units() {
        assert_eq!(format_market_cap(1_000_000_000_000.0), "$1.00T");
        assert_eq!(format_market_cap(3_450_000_000_000.0), "$3.45T");
        assert_eq!(format_market_cap(2_500_000_000.0), "$2.50B");
        assert_eq!(format_market_cap(1_234_567.0), "$1.23M");
        assert_eq!(format_market_cap(12_345.0), "$12,345");
        assert_eq!(format_market_cap(500.0), "$500");
        assert_eq!(format_market_cap(0.0), "$0");
    }

    #[test]
    fn market_cap_boundaries_use_raw_magnitude() {
        assert_eq!(format_market_cap(999_999_999.0), "$1000.00M");
        assert_eq!(format_market_cap(999_999.0), "$999,999");
        assert_eq!(format_market_cap(1_000_000.0), "$1.00M");
        assert_eq!(format_market_cap(999_999_999_999.0), "$1000.00B");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
        assert_eq!(format_volume(45_678_901), "45,678,901");
    }

    #[test]
    fn price_and_percent() {
        assert_eq!(format_price(187.456), "$187.46");
        assert_eq!(format_percent(10.0), "10.00%");
        assert_eq!(format_percent(-10.0), "-10.00%");
    }

    #[test]
    fn axis_volume() {
        assert_eq!(format_axis_volume(532.0), "532");
        assert_eq!(format_axis_volume(12_300.0), "12.30K");
        assert_eq!(format_axis_volume(3_456_700.0), "3.46M");
        assert_eq!(format_axis_volume(9_876_543_210.0), "9.88B");
    }

    #[test]
    fn sign_of_values() {
        assert_eq!((-3.2_f64).sign(), Ordering::Less);
        assert_eq!(0.0_f64.sign(), Ordering::Equal);
        assert_eq!(12.0_f64.sign(), Ordering::Greater);
        assert_eq!(f64::NAN.sign(), Ordering::Equal);
    }
}
