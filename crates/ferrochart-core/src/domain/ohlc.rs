use serde::{Deserialize, Serialize};

/// OHLCV bar in the shape the charting client consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcRecord {
    /// Trading day as `YYYY-MM-DD`, or the provider's own string verbatim.
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_float_prices_and_integer_volume() {
        let record = OhlcRecord {
            date: String::from("2024-01-02"),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: 1000,
        };

        let json = serde_json::to_string(&record).expect("record should serialize");
        assert_eq!(
            json,
            r#"{"date":"2024-01-02","open":10.0,"high":12.0,"low":9.0,"close":11.0,"volume":1000}"#
        );
    }
}
