use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{FetchError, SpotSource, SpotTicker};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};

const DEFAULT_BASE_URL: &str = "https://api.bybit.com";

/// Market category is a fixed parameter of every tickers call.
const CATEGORY: &str = "spot";

/// Bybit V5 market-data adapter.
///
/// Talks to `GET /v5/market/tickers` and normalizes the venue's envelope
/// into [`SpotTicker`]. A non-zero `retCode` in the envelope is a venue-level
/// failure and is returned as a ticker, not an error; only transport and
/// decode problems surface as [`FetchError`].
pub struct BybitAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl BybitAdapter {
    pub fn new() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 10_000,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn tickers_url(&self, symbol: &str) -> String {
        format!(
            "{}/v5/market/tickers?category={CATEGORY}&symbol={}",
            self.base_url,
            urlencoding::encode(symbol)
        )
    }

    fn decode_ticker(body: &str) -> Result<SpotTicker, FetchError> {
        let envelope: TickersEnvelope = serde_json::from_str(body)
            .map_err(|e| FetchError::malformed(format!("failed to parse tickers response: {e}")))?;

        if envelope.ret_code != 0 {
            return Ok(SpotTicker {
                ret_code: envelope.ret_code,
                ret_msg: envelope.ret_msg,
                last_price: None,
            });
        }

        let row = envelope
            .result
            .and_then(|result| result.list.into_iter().next())
            .ok_or_else(|| FetchError::malformed("tickers response contains no ticker row"))?;

        let last_price = row.last_price.parse::<f64>().map_err(|_| {
            FetchError::malformed(format!("unparsable lastPrice '{}'", row.last_price))
        })?;
        if !last_price.is_finite() || last_price < 0.0 {
            return Err(FetchError::malformed(format!(
                "lastPrice '{}' is out of range",
                row.last_price
            )));
        }

        Ok(SpotTicker {
            ret_code: envelope.ret_code,
            ret_msg: envelope.ret_msg,
            last_price: Some(last_price),
        })
    }
}

impl Default for BybitAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotSource for BybitAdapter {
    fn fetch_spot<'a>(
        &'a self,
        symbol: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<SpotTicker, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            let request =
                HttpRequest::get(self.tickers_url(symbol)).with_timeout_ms(self.timeout_ms);

            let response = self
                .http_client
                .execute(request)
                .await
                .map_err(|e| FetchError::transport(format!("bybit transport error: {e}")))?;

            if !response.is_success() {
                return Err(FetchError::transport(format!(
                    "bybit returned status {}",
                    response.status
                )));
            }

            Self::decode_ticker(&response.body)
        })
    }
}

// Bybit V5 wire envelope, narrowed to the fields the report needs.
#[derive(Debug, Deserialize)]
struct TickersEnvelope {
    #[serde(rename = "retCode")]
    ret_code: i32,
    #[serde(rename = "retMsg")]
    ret_msg: String,
    #[serde(default)]
    result: Option<TickersResult>,
}

#[derive(Debug, Deserialize)]
struct TickersResult {
    #[serde(default)]
    list: Vec<TickerRow>,
}

#[derive(Debug, Deserialize)]
struct TickerRow {
    #[serde(rename = "lastPrice")]
    last_price: String,
}
