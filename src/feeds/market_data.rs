use crate::errors::{PricerError, PricerResult};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

/// Chart-API market data client (Yahoo-style `/v8/finance/chart`). One GET
/// per lookup, no caching; the core consumes only the last adjusted close of
/// the returned daily series as the spot price.
#[derive(Clone)]
pub struct MarketDataClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub adj_close: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PriceHistory {
    pub ticker: String,
    /// Daily points, oldest first.
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn last_price(&self) -> PricerResult<f64> {
        self.points
            .last()
            .map(|p| p.adj_close)
            .ok_or_else(|| PricerError::MarketData(format!("no prices for {}", self.ticker)))
    }
}

impl MarketDataClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_history(&self, ticker: &str) -> PricerResult<PriceHistory> {
        let url = format!(
            "{}/v8/finance/chart/{ticker}?range=1y&interval=1d",
            self.base_url
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PricerError::MarketData(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PricerError::MarketData(format!("HTTP {status}: {body}")));
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| PricerError::MarketData(format!("parse: {e}")))?;

        parse_history(ticker, data)
    }
}

// Chart API response shape:
// {
//   "chart": {
//     "result": [
//       {
//         "timestamp": [1688398200, ...],
//         "indicators": { "adjclose": [ { "adjclose": [192.46, ...] } ] }
//       }
//     ],
//     "error": null
//   }
// }

#[derive(serde::Deserialize)]
struct ChartResponse {
    chart: Option<Chart>,
}

#[derive(serde::Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(serde::Deserialize)]
struct Indicators {
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(serde::Deserialize)]
struct AdjClose {
    adjclose: Option<Vec<Option<f64>>>,
}

fn parse_history(ticker: &str, data: ChartResponse) -> PricerResult<PriceHistory> {
    let result = data
        .chart
        .and_then(|c| c.result)
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| PricerError::MarketData(format!("no chart data for {ticker}")))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .and_then(|i| i.adjclose)
        .and_then(|a| a.into_iter().next())
        .and_then(|a| a.adjclose)
        .ok_or_else(|| {
            PricerError::MarketData(format!("no adjusted close series for {ticker}"))
        })?;

    // Holidays and halts come back as nulls; skip them
    let points: Vec<PricePoint> = timestamps
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close?;
            if !close.is_finite() || close <= 0.0 {
                return None;
            }
            DateTime::from_timestamp(ts, 0).map(|timestamp| PricePoint {
                timestamp,
                adj_close: close,
            })
        })
        .collect();

    if points.is_empty() {
        return Err(PricerError::MarketData(format!(
            "no usable prices for {ticker}"
        )));
    }

    Ok(PriceHistory {
        ticker: ticker.to_string(),
        points,
    })
}
