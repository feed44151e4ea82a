use anyhow::{anyhow, bail, Context, Result};
use dashmap::DashMap;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::MarketData;
use crate::config::Config;
use crate::data::{Bar, Period, Series, Snapshot, Ticker};

/// Yahoo Finance chart / quote-summary client
///
/// `quoteSummary` only answers with a session cookie plus the matching
/// crumb; both are fetched on first use and kept until Yahoo rejects them.
#[derive(Debug)]
pub struct Yahoo {
    client: Client,
    base_url: String,
    cookie_url: String,
    crumb: Mutex<Option<String>>,
    /// Name and last price from chart responses, used when the summary fails
    quotes: DashMap<Ticker, ChartQuote>,
}

impl Yahoo {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cookie_url: config.cookie_url.clone(),
            crumb: Mutex::new(None),
            quotes: DashMap::new(),
        })
    }

    fn chart_url(&self, ticker: &Ticker, period: Period, now: OffsetDateTime) -> String {
        format!(
            "{}/v8/finance/chart/{}?interval=1d&period1={}&period2={}&includeAdjustedClose=true",
            self.base_url,
            ticker,
            period.start_from(now).unix_timestamp(),
            now.unix_timestamp(),
        )
    }

    fn summary_request(&self, ticker: &Ticker, crumb: &str) -> RequestBuilder {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=price,assetProfile,financialData",
            self.base_url, ticker
        );
        self.client.get(url).query(&[("crumb", crumb)])
    }

    async fn fetch(request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn crumb(&self) -> Result<String> {
        let mut crumb = self.crumb.lock().await;
        if let Some(crumb) = crumb.as_ref() {
            return Ok(crumb.clone());
        }

        // only the Set-Cookie header matters, the status is usually 404
        self.client
            .get(&self.cookie_url)
            .send()
            .await
            .context("session cookie request failed")?;
        let (status, body) = Self::fetch(
            self.client
                .get(format!("{}/v1/test/getcrumb", self.base_url)),
        )
        .await
        .context("crumb request failed")?;
        let fresh = parse_crumb(status, &body)?;

        tracing::debug!("obtained quote summary crumb");
        *crumb = Some(fresh.clone());
        Ok(fresh)
    }

    async fn try_snapshot(&self, ticker: &Ticker) -> Result<Snapshot> {
        let crumb = self.crumb().await?;
        let (status, body) = Self::fetch(self.summary_request(ticker, &crumb)).await?;
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(%ticker, "crumb rejected, dropping it");
            *self.crumb.lock().await = None;
        }
        parse_summary(status, &body)
    }
}

impl MarketData for Yahoo {
    async fn history(&self, ticker: &Ticker, period: Period) -> Result<Series> {
        let url = self.chart_url(ticker, period, OffsetDateTime::now_utc());
        tracing::debug!(%ticker, %period, "requesting daily history");

        let (status, body) = Self::fetch(self.client.get(&url))
            .await
            .with_context(|| format!("[{ticker}] history request failed"))?;
        let (series, quote) = parse_chart(ticker, status, &body)?;
        self.quotes.insert(ticker.clone(), quote);

        tracing::info!(%ticker, %period, bars = series.len(), "history loaded");
        Ok(series)
    }

    async fn snapshot(&self, ticker: &Ticker) -> Snapshot {
        match self.try_snapshot(ticker).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                let fallback = self.quotes.get(ticker).map(|quote| quote.snapshot());
                tracing::debug!(
                    %ticker,
                    error = %err,
                    chart_meta = fallback.is_some(),
                    "quote summary unavailable"
                );
                fallback.unwrap_or_else(Snapshot::placeholder)
            }
        }
    }
}

// `chart` schema
#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: ChartResponse,
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    code: Option<String>,
    description: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("error"),
            self.description.as_deref().unwrap_or("no description")
        )
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
}

/// What a chart response tells about the company itself
#[derive(Clone, Debug, Default, PartialEq)]
struct ChartQuote {
    name: Option<String>,
    price: Option<f64>,
}

impl ChartQuote {
    /// Snapshot without sector and market cap
    fn snapshot(&self) -> Snapshot {
        let placeholder = Snapshot::placeholder();
        Snapshot {
            name: self.name.clone().unwrap_or(placeholder.name),
            current_price: self.price.unwrap_or(placeholder.current_price),
            ..placeholder
        }
    }
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Debug, Default)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Deserialize, Debug)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

fn parse_chart(ticker: &Ticker, status: StatusCode, body: &str) -> Result<(Series, ChartQuote)> {
    let envelope: ChartEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) if status.is_success() => {
            return Err(err).with_context(|| format!("[{ticker}] malformed chart response"))
        }
        Err(_) => bail!("[{ticker}] history request returned {status}"),
    };

    if let Some(err) = envelope.chart.error {
        bail!("[{ticker}] {err}");
    }
    if !status.is_success() {
        bail!("[{ticker}] history request returned {status}");
    }

    let result = envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| anyhow!("[{ticker}] no chart result"))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();
    let offset = result.meta.gmtoffset;
    let quote_meta = ChartQuote {
        name: result.meta.long_name.or(result.meta.short_name),
        price: result.meta.regular_market_price,
    };

    let bars: Vec<Bar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let at = |column: &[Option<f64>]| column.get(i).copied().flatten();
            let (open, high, low, close) = (
                at(&quote.open)?,
                at(&quote.high)?,
                at(&quote.low)?,
                at(&quote.close)?,
            );
            let date = OffsetDateTime::from_unix_timestamp(ts + offset)
                .ok()?
                .date();

            // Back-adjust for splits and dividends the way the adjusted close does
            let ratio = at(&adjclose)
                .filter(|_| close.abs() > f64::EPSILON)
                .map_or(1.0, |adj| adj / close);

            Some(Bar {
                date,
                open: open * ratio,
                high: high * ratio,
                low: low * ratio,
                close: close * ratio,
                volume: quote.volume.get(i).copied().flatten().unwrap_or_default(),
            })
        })
        .collect();

    if bars.is_empty() {
        bail!("[{ticker}] no price data in range");
    }
    Ok((Series::new(ticker.clone(), bars), quote_meta))
}

// `quoteSummary` schema
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: SummaryResponse,
}

#[derive(Deserialize, Debug)]
struct SummaryResponse {
    result: Option<Vec<SummaryResult>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
    #[serde(default)]
    financial_data: Option<FinancialData>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    short_name: Option<String>,
    market_cap: Option<RawValue>,
    regular_market_price: Option<RawValue>,
}

#[derive(Deserialize, Debug, Default)]
struct AssetProfile {
    sector: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<RawValue>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
struct RawValue {
    raw: Option<f64>,
}

// error bodies of rejected requests, e.g. an invalid crumb
#[derive(Deserialize, Debug)]
struct FinanceEnvelope {
    finance: FinanceResponse,
}

#[derive(Deserialize, Debug)]
struct FinanceResponse {
    error: Option<ApiError>,
}

fn parse_crumb(status: StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        bail!("crumb request returned {status}");
    }
    let crumb = body.trim();
    if crumb.is_empty() || crumb.contains(|c: char| c.is_whitespace() || matches!(c, '<' | '{')) {
        bail!("unexpected crumb response");
    }
    Ok(crumb.to_string())
}

fn parse_summary(status: StatusCode, body: &str) -> Result<Snapshot> {
    if !status.is_success() {
        match serde_json::from_str::<FinanceEnvelope>(body) {
            Ok(FinanceEnvelope {
                finance: FinanceResponse { error: Some(err) },
            }) => bail!("quote summary returned {status}: {err}"),
            _ => bail!("quote summary returned {status}"),
        }
    }
    let envelope: SummaryEnvelope =
        serde_json::from_str(body).context("malformed quote summary")?;
    if let Some(err) = envelope.quote_summary.error {
        bail!("{err}");
    }
    let result = envelope
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| anyhow!("empty quote summary"))?;

    let placeholder = Snapshot::placeholder();
    let price = result.price.unwrap_or_default();
    let raw = |value: Option<RawValue>| value.and_then(|v| v.raw);

    Ok(Snapshot {
        name: price
            .long_name
            .or(price.short_name)
            .unwrap_or(placeholder.name),
        sector: result
            .asset_profile
            .and_then(|profile| profile.sector)
            .filter(|sector| !sector.is_empty())
            .unwrap_or(placeholder.sector),
        market_cap: raw(price.market_cap).unwrap_or(placeholder.market_cap),
        current_price: raw(result.financial_data.and_then(|f| f.current_price))
            .or(raw(price.regular_market_price))
            .unwrap_or(placeholder.current_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "AAPL",
                    "gmtoffset": -14400,
                    "longName": "Apple Inc.",
                    "regularMarketPrice": 181.91
                },
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{
                        "open":   [187.15, null, 182.15],
                        "high":   [188.44, 185.88, 183.09],
                        "low":    [183.89, 183.43, 180.88],
                        "close":  [185.64, 184.25, 181.91],
                        "volume": [82488700, 58414500, null]
                    }],
                    "adjclose": [{ "adjclose": [185.64, 184.25, 90.955] }]
                }
            }],
            "error": null
        }
    }"#;

    const NOT_FOUND: &str = r#"{
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    }"#;

    #[test]
    fn parses_chart_and_skips_incomplete_bars() {
        let (series, _) = parse_chart(&Ticker::new("AAPL"), StatusCode::OK, CHART).expect("chart");
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date!(2024 - 01 - 02)));
        assert_eq!(series.last_date(), Some(date!(2024 - 01 - 04)));
        assert_eq!(series.bars[0].volume, 82_488_700);
        assert_eq!(series.bars[1].volume, 0);
    }

    #[test]
    fn applies_adjusted_close_ratio() {
        let (series, _) = parse_chart(&Ticker::new("AAPL"), StatusCode::OK, CHART).expect("chart");
        let last = series.bars[1];
        assert!((last.close - 90.955).abs() < 1e-9);
        assert!((last.open - 182.15 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn chart_meta_fills_name_and_price() {
        let (_, quote) = parse_chart(&Ticker::new("AAPL"), StatusCode::OK, CHART).expect("chart");
        let snapshot = quote.snapshot();
        assert_eq!(snapshot.name, "Apple Inc.");
        assert!((snapshot.current_price - 181.91).abs() < f64::EPSILON);
        assert_eq!(snapshot.sector, "N/A");
        assert!(snapshot.is_partial());
        assert!(!snapshot.is_placeholder());

        assert!(ChartQuote::default().snapshot().is_placeholder());
    }

    #[test]
    fn reports_provider_error() {
        let err = parse_chart(&Ticker::new("ZZZZ"), StatusCode::NOT_FOUND, NOT_FOUND)
            .expect_err("unknown symbol");
        assert!(err.to_string().contains("No data found"));
    }

    #[test]
    fn rejects_empty_and_garbage_responses() {
        let empty = r#"{"chart":{"result":[{"timestamp":[],"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart(&Ticker::new("AAPL"), StatusCode::OK, empty).is_err());
        assert!(parse_chart(&Ticker::new("AAPL"), StatusCode::BAD_GATEWAY, "<html>").is_err());
        assert!(parse_chart(&Ticker::new("AAPL"), StatusCode::OK, "not json").is_err());
    }

    #[test]
    fn parses_summary_with_fallbacks() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "longName": "Apple Inc.",
                        "marketCap": { "raw": 3450000000000, "fmt": "3.45T" },
                        "regularMarketPrice": { "raw": 229.5 }
                    },
                    "assetProfile": { "sector": "Technology" }
                }],
                "error": null
            }
        }"#;
        let snapshot = parse_summary(StatusCode::OK, body).expect("summary");
        assert_eq!(snapshot.name, "Apple Inc.");
        assert_eq!(snapshot.sector, "Technology");
        assert!((snapshot.market_cap - 3.45e12).abs() < 1.0);
        assert!((snapshot.current_price - 229.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_missing_fields_use_placeholders() {
        let body = r#"{"quoteSummary":{"result":[{"price":{"shortName":"Visa"}}],"error":null}}"#;
        let snapshot = parse_summary(StatusCode::OK, body).expect("summary");
        assert_eq!(snapshot.name, "Visa");
        assert_eq!(snapshot.sector, "N/A");
        assert!(snapshot.market_cap.abs() < f64::EPSILON);
    }

    #[test]
    fn summary_errors() {
        assert!(parse_summary(StatusCode::UNAUTHORIZED, "{}").is_err());
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found"}}}"#;
        assert!(parse_summary(StatusCode::OK, body).is_err());
    }

    #[test]
    fn invalid_crumb_is_reported() {
        let body = r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        let err = parse_summary(StatusCode::UNAUTHORIZED, body).expect_err("rejected");
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Invalid Crumb"));
    }

    #[test]
    fn crumb_body_is_validated() {
        assert_eq!(
            parse_crumb(StatusCode::OK, "Xk2bP9.vQ/a\n").expect("crumb"),
            "Xk2bP9.vQ/a"
        );
        assert!(parse_crumb(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").is_err());
        assert!(parse_crumb(StatusCode::OK, "").is_err());
        assert!(parse_crumb(StatusCode::OK, "<html><body>consent</body></html>").is_err());
    }

    #[test]
    fn summary_request_carries_crumb() {
        let yahoo = Yahoo::new(&Config::default()).expect("client");
        let request = yahoo
            .summary_request(&Ticker::new("msft"), "ab/c")
            .build()
            .expect("request");
        let url = request.url().as_str();
        assert!(url.starts_with("https://query2.finance.yahoo.com/v10/finance/quoteSummary/MSFT?"));
        assert!(url.contains("modules=price,assetProfile,financialData"));
        assert!(url.contains("crumb=ab%2Fc"));
    }

    #[test]
    fn chart_url_uses_calendar_window() {
        let yahoo = Yahoo::new(&Config::default()).expect("client");
        let url = yahoo.chart_url(
            &Ticker::new("brk-b"),
            Period::OneYear,
            datetime!(2026-10-16 00:00 UTC),
        );
        assert!(url.starts_with("https://query2.finance.yahoo.com/v8/finance/chart/BRK-B?"));
        assert!(url.contains(&format!(
            "period1={}",
            datetime!(2025-10-16 00:00 UTC).unix_timestamp()
        )));
        assert!(url.contains("interval=1d"));
    }
}
