use crate::data::Ticker;

/// Entries a group starts with selected
pub const DEFAULT_SELECTION: usize = 3;

static TOP_MARKET_CAP: &[(&str, &str)] = &[
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Alphabet (Google)", "GOOGL"),
    ("Amazon", "AMZN"),
    ("NVIDIA", "NVDA"),
    ("Tesla", "TSLA"),
    ("Meta (Facebook)", "META"),
    ("Berkshire Hathaway", "BRK-B"),
    ("Taiwan Semiconductor", "TSM"),
    ("Visa", "V"),
];

static AI_LEADERS: &[(&str, &str)] = &[
    ("NVIDIA", "NVDA"),
    ("AMD", "AMD"),
    ("Palantir", "PLTR"),
    ("Snowflake", "SNOW"),
    ("ServiceNow", "NOW"),
    ("UiPath", "PATH"),
    ("C3.ai", "AI"),
    ("SoundHound AI", "SOUN"),
    ("Arm Holdings", "ARM"),
    ("Symbotic", "SYM"),
];

/// A company as listed in a group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Company {
    pub name: &'static str,
    pub symbol: &'static str,
}

impl Company {
    pub fn ticker(&self) -> Ticker {
        Ticker::new(self.symbol)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Group {
    #[default]
    TopMarketCap,
    AiLeaders,
}

impl Group {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "top" | "top10" => Some(Self::TopMarketCap),
            "ai" => Some(Self::AiLeaders),
            _ => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::TopMarketCap => t!("group.top"),
            Self::AiLeaders => t!("group.ai"),
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::TopMarketCap => TOP_MARKET_CAP,
            Self::AiLeaders => AI_LEADERS,
        }
    }

    /// Companies in display order
    pub fn companies(self) -> impl Iterator<Item = Company> {
        self.table()
            .iter()
            .map(|&(name, symbol)| Company { name, symbol })
    }

    pub fn len(self) -> usize {
        self.table().len()
    }

    pub fn is_empty(self) -> bool {
        self.table().is_empty()
    }

    pub fn company(self, index: usize) -> Option<Company> {
        self.companies().nth(index)
    }

    /// Look up by symbol, case-insensitively
    pub fn find_symbol(self, symbol: &str) -> Option<Company> {
        self.companies()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol.trim()))
    }

    pub fn default_selection(self) -> Vec<Company> {
        self.companies().take(DEFAULT_SELECTION).collect()
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_hold_ten_companies_each() {
        for group in Group::iter() {
            assert_eq!(group.len(), 10);
        }
    }

    #[test]
    fn default_selection_is_first_three() {
        let names: Vec<&str> = Group::TopMarketCap
            .default_selection()
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Apple", "Microsoft", "Alphabet (Google)"]);

        let symbols: Vec<&str> = Group::AiLeaders
            .default_selection()
            .iter()
            .map(|c| c.symbol)
            .collect();
        assert_eq!(symbols, ["NVDA", "AMD", "PLTR"]);
    }

    #[test]
    fn lookups() {
        assert_eq!(
            Group::TopMarketCap.find_symbol("brk-b").map(|c| c.name),
            Some("Berkshire Hathaway")
        );
        assert_eq!(Group::AiLeaders.find_symbol("ai").map(|c| c.name), Some("C3.ai"));
        assert!(Group::AiLeaders.find_symbol("AAPL").is_none());
        assert_eq!(Group::TopMarketCap.company(9).map(|c| c.symbol), Some("V"));
        assert!(Group::TopMarketCap.company(10).is_none());
    }

    #[test]
    fn parses_group_codes() {
        assert_eq!(Group::parse("AI"), Some(Group::AiLeaders));
        assert_eq!(Group::parse("top"), Some(Group::TopMarketCap));
        assert_eq!(Group::parse("crypto"), None);
    }
}
