use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Suffix for National Stock Exchange of India listings.
pub const DEFAULT_MARKET_SUFFIX: &str = ".NS";

/// Exchange suffix appended to bare tickers before they reach a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketSuffix(String);

impl MarketSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append the suffix unless `raw` already ends with it.
    ///
    /// The match is literal and case-sensitive, so `infy.ns` becomes
    /// `infy.ns.NS`. Applying it twice yields the same symbol.
    pub fn normalize(&self, raw: &str) -> TickerSymbol {
        if raw.ends_with(self.as_str()) {
            TickerSymbol(raw.to_owned())
        } else {
            TickerSymbol(format!("{raw}{}", self.as_str()))
        }
    }
}

impl Default for MarketSuffix {
    fn default() -> Self {
        Self::new(DEFAULT_MARKET_SUFFIX)
    }
}

impl Display for MarketSuffix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize `raw` with the default `.NS` suffix.
pub fn normalize(raw: &str) -> TickerSymbol {
    MarketSuffix::default().normalize(raw)
}

/// Provider-ready ticker that always carries its market suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TickerSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TickerSymbol> for String {
    fn from(value: TickerSymbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_suffix_to_bare_ticker() {
        assert_eq!(normalize("AAA").as_str(), "AAA.NS");
        assert_eq!(normalize("reliance").as_str(), "reliance.NS");
    }

    #[test]
    fn keeps_already_suffixed_ticker() {
        assert_eq!(normalize("ZZZ.NS").as_str(), "ZZZ.NS");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["TCS", "TCS.NS", "infy.ns", "M&M", ".NS", "A.NS.NS"] {
            let once = normalize(raw);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "normalize must be idempotent for {raw:?}");
        }
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert_eq!(normalize("infy.ns").as_str(), "infy.ns.NS");
    }

    #[test]
    fn custom_suffix_is_applied() {
        let bse = MarketSuffix::new(".BO");
        assert_eq!(bse.normalize("SBIN").as_str(), "SBIN.BO");
        assert_eq!(bse.normalize("SBIN.BO").as_str(), "SBIN.BO");
    }
}
