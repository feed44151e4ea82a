/// Exchange ticker symbol (e.g. AAPL, BRK-B)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker {
    inner: String,
}

impl Ticker {
    pub fn new(symbol: &str) -> Self {
        Self {
            inner: symbol.trim().to_ascii_uppercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lookback window for daily history
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum Period {
    OneYear,
    TwoYears,
    #[default]
    ThreeYears,
    FiveYears,
}

impl Period {
    pub fn years(self) -> i32 {
        match self {
            Self::OneYear => 1,
            Self::TwoYears => 2,
            Self::ThreeYears => 3,
            Self::FiveYears => 5,
        }
    }

    /// Short code, as accepted on the command line
    pub fn code(self) -> &'static str {
        match self {
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::ThreeYears => "3y",
            Self::FiveYears => "5y",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        Self::iter().find(|p| p.code().eq_ignore_ascii_case(code))
    }

    pub fn label(self) -> String {
        t!("period.label", years = self.years())
    }

    /// First instant of the window ending at `now`, in calendar years
    pub fn start_from(self, now: time::OffsetDateTime) -> time::OffsetDateTime {
        let year = now.year() - self.years();
        now.replace_year(year).unwrap_or_else(|_| {
            // Feb 29 has no counterpart in a non-leap year
            now - time::Duration::days(365 * i64::from(self.years()))
        })
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// How the price chart is drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum ChartStyle {
    #[default]
    Line,
    Candlestick,
}

impl ChartStyle {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "line" => Some(Self::Line),
            "candle" | "candlestick" => Some(Self::Candlestick),
            _ => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Line => t!("chart.line"),
            Self::Candlestick => t!("chart.candlestick"),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn ticker_is_normalized() {
        assert_eq!(Ticker::new(" brk-b "), Ticker::new("BRK-B"));
        assert_eq!(Ticker::from("aapl").to_string(), "AAPL");
    }

    #[test]
    fn period_codes_round_trip() {
        for period in Period::iter() {
            assert_eq!(Period::parse(period.code()), Some(period));
        }
        assert_eq!(Period::parse("3Y"), Some(Period::ThreeYears));
        assert_eq!(Period::parse("10y"), None);
        assert_eq!(Period::default(), Period::ThreeYears);
    }

    #[test]
    fn period_start_goes_back_calendar_years() {
        let now = datetime!(2026-10-16 12:00 UTC);
        assert_eq!(
            Period::FiveYears.start_from(now),
            datetime!(2021-10-16 12:00 UTC)
        );

        let leap = datetime!(2024-02-29 00:00 UTC);
        assert_eq!(
            Period::OneYear.start_from(leap),
            datetime!(2023-03-01 00:00 UTC)
        );
    }

    #[test]
    fn chart_style_parses_aliases() {
        assert_eq!(ChartStyle::parse("line"), Some(ChartStyle::Line));
        assert_eq!(ChartStyle::parse("candle"), Some(ChartStyle::Candlestick));
        assert_eq!(ChartStyle::parse("Candlestick"), Some(ChartStyle::Candlestick));
        assert_eq!(ChartStyle::parse("bar"), None);
    }
}
