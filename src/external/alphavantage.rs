use crate::config::AppConfig;
use crate::external::market_data::{DailyBar, MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AlphaVantageClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MarketDataError> {
        Self::new(
            config.alpha_vantage_api_key.clone(),
            config.alpha_vantage_base_url.clone(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct AvDailyResponse {
    #[serde(rename = "Meta Data")]
    meta_data: Option<AvMetaData>,

    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, AvDailyBar>>,

    // Throttled calls come back as 200 with only a "Note" or "Information".
    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Information")]
    information: Option<String>,

    // Unknown symbols: { "Error Message": "Invalid API call. ..." }
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvMetaData {
    #[serde(rename = "2. Symbol")]
    symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    last_refreshed: String,
}

#[derive(Debug, Deserialize)]
struct AvDailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

impl AvDailyBar {
    fn into_daily_bar(self, meta: &AvMetaData, date: String) -> Result<DailyBar, MarketDataError> {
        Ok(DailyBar {
            symbol: meta.symbol.clone(),
            open: parse_field(&date, "open", &self.open)?,
            high: parse_field(&date, "high", &self.high)?,
            low: parse_field(&date, "low", &self.low)?,
            close: parse_field(&date, "close", &self.close)?,
            volume: parse_field(&date, "volume", &self.volume)?,
            last_refreshed: meta.last_refreshed.clone(),
            date,
        })
    }
}

fn parse_field<T: FromStr>(date: &str, field: &'static str, raw: &str) -> Result<T, MarketDataError> {
    raw.trim().parse::<T>().map_err(|_| MarketDataError::Parse {
        date: date.to_string(),
        field,
        value: raw.to_string(),
    })
}

/// Decodes a `TIME_SERIES_DAILY` body into one bar per date entry.
pub fn parse_daily_response(body: &str) -> Result<Vec<DailyBar>, MarketDataError> {
    let response: AvDailyResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::Decode(e.to_string()))?;

    if let Some(msg) = response.error_message {
        return Err(MarketDataError::Provider(msg));
    }

    if let Some(note) = response.note.or(response.information) {
        return Err(MarketDataError::RateLimited(note));
    }

    let meta = response
        .meta_data
        .ok_or_else(|| MarketDataError::BadResponse("missing Meta Data".into()))?;

    let series = response
        .time_series
        .ok_or_else(|| MarketDataError::BadResponse("missing Time Series (Daily)".into()))?;

    // BTreeMap iterates ascending by the YYYY-MM-DD key
    series
        .into_iter()
        .map(|(date, bar)| bar.into_daily_bar(&meta, date))
        .collect()
}

#[async_trait]
impl MarketDataProvider for AlphaVantageClient {
    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<DailyBar>, MarketDataError> {
        let url = format!("{}/query", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Alpha Vantage returned {} for {}", status, symbol);
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let bars = parse_daily_response(&body)?;
        debug!("Decoded {} daily bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SINGLE_DAY: &str = r#"{"Meta Data":{"2. Symbol":"ABC","3. Last Refreshed":"2024-01-02"},"Time Series (Daily)":{"2024-01-02":{"1. open":"10.0","2. high":"11.0","3. low":"9.5","4. close":"10.5","5. volume":"1000"}}}"#;

    const THREE_DAYS: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-03-06",
            "4. Output Size": "Compact",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2024-03-06": {"1. open": "192.0000", "2. high": "193.9400", "3. low": "190.5700", "4. close": "191.2400", "5. volume": "4576541"},
            "2024-03-04": {"1. open": "187.7600", "2. high": "188.7950", "3. low": "186.2800", "4. close": "187.8000", "5. volume": "4315052"},
            "2024-03-05": {"1. open": "188.0000", "2. high": "189.6900", "3. low": "186.6300", "4. close": "189.5000", "5. volume": "3909960"}
        }
    }"#;

    #[test]
    fn test_single_entry_decodes_to_one_bar() {
        let bars = parse_daily_response(SINGLE_DAY).unwrap();

        assert_eq!(
            bars,
            vec![DailyBar {
                symbol: "ABC".to_string(),
                date: "2024-01-02".to_string(),
                open: 10.0,
                high: 11.0,
                low: 9.5,
                close: 10.5,
                volume: 1000,
                last_refreshed: "2024-01-02".to_string(),
            }]
        );
    }

    #[test]
    fn test_every_entry_carries_metadata() {
        let bars = parse_daily_response(THREE_DAYS).unwrap();

        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.symbol == "IBM" && b.last_refreshed == "2024-03-06"));
        let dates: Vec<&str> = bars.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-04", "2024-03-05", "2024-03-06"]);
        assert_eq!(bars[2].volume, 4_576_541);
    }

    #[test]
    fn test_malformed_field_is_an_error_not_zero() {
        let body = SINGLE_DAY.replace(r#""5. volume":"1000""#, r#""5. volume":"1,000""#);

        match parse_daily_response(&body) {
            Err(MarketDataError::Parse { date, field, value }) => {
                assert_eq!(date, "2024-01-02");
                assert_eq!(field, "volume");
                assert_eq!(value, "1,000");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_error_message() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
        assert!(matches!(parse_daily_response(body), Err(MarketDataError::Provider(_))));
    }

    #[test]
    fn test_throttle_note_is_rate_limited() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        assert!(matches!(parse_daily_response(body), Err(MarketDataError::RateLimited(_))));

        let body = r#"{"Information": "API rate limit reached."}"#;
        assert!(matches!(parse_daily_response(body), Err(MarketDataError::RateLimited(_))));
    }

    #[test]
    fn test_missing_series_is_bad_response() {
        let body = r#"{"Meta Data":{"2. Symbol":"ABC","3. Last Refreshed":"2024-01-02"}}"#;
        assert!(matches!(parse_daily_response(body), Err(MarketDataError::BadResponse(_))));
        assert!(matches!(parse_daily_response("{}"), Err(MarketDataError::BadResponse(_))));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        assert!(matches!(parse_daily_response("<html>"), Err(MarketDataError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_daily_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("function", "TIME_SERIES_DAILY"))
            .and(query_param("symbol", "ABC"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SINGLE_DAY))
            .expect(1)
            .mount(&server)
            .await;

        let client = AlphaVantageClient::new("test-key", server.uri()).unwrap();
        let bars = client.fetch_daily("ABC").await.unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.5);
    }

    #[tokio::test]
    async fn test_non_success_status_returns_no_bars() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(503).set_body_string(SINGLE_DAY))
            .mount(&server)
            .await;

        let client = AlphaVantageClient::new("test-key", format!("{}/", server.uri())).unwrap();

        match client.fetch_daily("ABC").await {
            Err(MarketDataError::Status(code)) => assert_eq!(code, 503),
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
