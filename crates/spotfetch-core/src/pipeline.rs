//! Per-symbol resilient fetch pipeline.
//!
//! Consumes the ordered symbol sequence and yields exactly one
//! [`PriceRecord`] per input line, success or failure, in input order. The
//! pipeline is strictly sequential: each lookup is awaited to completion
//! before the next symbol is attempted, so there is never more than one
//! in-flight request and no reordering buffer is needed.

use tracing::{info, warn};

use crate::data_source::SpotSource;
use crate::domain::{PriceRecord, RET_CODE_UNKNOWN};
use crate::UtcDateTime;

/// Lazy, pull-based sequence of price records.
///
/// A failed lookup never halts or skips subsequent symbols; it only shapes
/// that symbol's record.
pub struct PriceFetcher<'a, I> {
    symbols: I,
    source: &'a dyn SpotSource,
}

impl<'a, I> PriceFetcher<'a, I>
where
    I: Iterator<Item = String>,
{
    pub fn new(symbols: I, source: &'a dyn SpotSource) -> Self {
        Self { symbols, source }
    }

    /// Produce the record for the next input line, or `None` when the
    /// sequence is exhausted. Records are stamped at fetch completion.
    pub async fn next_record(&mut self) -> Option<PriceRecord> {
        let symbol = self.symbols.next()?;
        Some(self.fetch_one(&symbol).await)
    }

    async fn fetch_one(&self, symbol: &str) -> PriceRecord {
        if symbol.is_empty() {
            info!("skip empty symbol");
            return PriceRecord::skipped(UtcDateTime::now());
        }

        info!(symbol, "requesting spot ticker");

        // One locally scoped outcome per iteration; nothing about the
        // in-flight lookup survives into the next symbol.
        match self.source.fetch_spot(symbol).await {
            Ok(ticker) if ticker.is_ok() => {
                // The venue answered OK; a missing price on an OK envelope is
                // the adapter's problem and arrives as Err instead.
                let price = ticker.last_price.unwrap_or_default();
                let as_of = UtcDateTime::now();
                info!(symbol, price, %as_of, "price received");
                PriceRecord::success(symbol, price, as_of)
            }
            Ok(ticker) => {
                warn!(
                    symbol,
                    ret_code = ticker.ret_code,
                    ret_msg = %ticker.ret_msg,
                    "venue rejected symbol"
                );
                PriceRecord::failure(
                    symbol,
                    ticker.ret_code,
                    ticker.ret_msg,
                    UtcDateTime::now(),
                    None,
                )
            }
            Err(error) => {
                let ret_code = error.ret_code().unwrap_or(RET_CODE_UNKNOWN);
                warn!(symbol, ret_code, error = %error, "lookup failed");
                PriceRecord::failure(
                    symbol,
                    ret_code,
                    error.message().to_owned(),
                    UtcDateTime::now(),
                    Some(error),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::{FetchError, SpotTicker};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    /// Scripted source: answers per symbol, records call order.
    struct ScriptedSource {
        outcomes: Vec<(&'static str, Result<SpotTicker, FetchError>)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<(&'static str, Result<SpotTicker, FetchError>)>) -> Self {
            Self {
                outcomes,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("not poisoned").clone()
        }
    }

    impl SpotSource for ScriptedSource {
        fn fetch_spot<'a>(
            &'a self,
            symbol: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<SpotTicker, FetchError>> + Send + 'a>> {
            self.calls
                .lock()
                .expect("not poisoned")
                .push(symbol.to_owned());
            let outcome = self
                .outcomes
                .iter()
                .find(|(s, _)| *s == symbol)
                .map(|(_, outcome)| outcome.clone())
                .unwrap_or_else(|| Err(FetchError::transport("unscripted symbol")));
            Box::pin(async move { outcome })
        }
    }

    fn ok_ticker(price: f64) -> Result<SpotTicker, FetchError> {
        Ok(SpotTicker {
            ret_code: 0,
            ret_msg: String::from("OK"),
            last_price: Some(price),
        })
    }

    fn rejected(ret_code: i32, msg: &str) -> Result<SpotTicker, FetchError> {
        Ok(SpotTicker {
            ret_code,
            ret_msg: String::from(msg),
            last_price: None,
        })
    }

    async fn collect(fetcher: &mut PriceFetcher<'_, impl Iterator<Item = String>>) -> Vec<PriceRecord> {
        let mut records = Vec::new();
        while let Some(record) = fetcher.next_record().await {
            records.push(record);
        }
        records
    }

    fn symbols(input: &[&str]) -> std::vec::IntoIter<String> {
        input
            .iter()
            .map(|s| (*s).to_owned())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[tokio::test]
    async fn one_record_per_line_in_input_order() {
        let source = ScriptedSource::new(vec![
            ("BTCUSDT", ok_ticker(65000.12)),
            ("ETHUSDT", Err(FetchError::transport("Not Found"))),
            ("SOLUSDT", ok_ticker(140.5)),
        ]);
        let mut fetcher = PriceFetcher::new(symbols(&["BTCUSDT", "ETHUSDT", "SOLUSDT"]), &source);

        let records = collect(&mut fetcher).await;

        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
            ["BTCUSDT", "ETHUSDT", "SOLUSDT"]
        );
        assert_eq!(source.calls(), ["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    }

    #[tokio::test]
    async fn blank_line_yields_skip_marker_without_a_lookup() {
        let source = ScriptedSource::new(vec![("BTCUSDT", ok_ticker(65000.12))]);
        let mut fetcher = PriceFetcher::new(symbols(&["", "BTCUSDT"]), &source);

        let records = collect(&mut fetcher).await;

        assert!(records[0].is_success());
        assert_eq!(records[0].symbol, "n/a");
        assert_eq!(records[0].price, 0.0);
        // The blank line never reached the venue.
        assert_eq!(source.calls(), ["BTCUSDT"]);
    }

    #[tokio::test]
    async fn venue_rejection_propagates_its_own_code_and_message() {
        let source = ScriptedSource::new(vec![("NOPE", rejected(10001, "Not supported symbols"))]);
        let mut fetcher = PriceFetcher::new(symbols(&["NOPE"]), &source);

        let record = fetcher.next_record().await.expect("one record");

        assert!(!record.is_success());
        assert_eq!(record.ret_code, 10001);
        assert_eq!(record.ret_msg.as_deref(), Some("Not supported symbols"));
        assert!(record.cause.is_none());
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_synthetic_code() {
        let source = ScriptedSource::new(vec![("BADSYM", Err(FetchError::transport("Not Found")))]);
        let mut fetcher = PriceFetcher::new(symbols(&["BADSYM"]), &source);

        let record = fetcher.next_record().await.expect("one record");

        assert_eq!(record.ret_code, -1);
        assert_eq!(record.ret_msg.as_deref(), Some("Not Found"));
        assert!(record.cause.is_some());
    }

    #[tokio::test]
    async fn recovered_partial_code_wins_over_synthetic() {
        let source = ScriptedSource::new(vec![(
            "HALF",
            Err(FetchError::malformed("truncated body").with_ret_code(10006)),
        )]);
        let mut fetcher = PriceFetcher::new(symbols(&["HALF"]), &source);

        let record = fetcher.next_record().await.expect("one record");

        assert_eq!(record.ret_code, 10006);
    }

    #[tokio::test]
    async fn failure_never_halts_the_batch() {
        let source = ScriptedSource::new(vec![
            ("A", Err(FetchError::transport("boom"))),
            ("B", rejected(10001, "bad")),
            ("C", ok_ticker(1.25)),
        ]);
        let mut fetcher = PriceFetcher::new(symbols(&["A", "B", "C"]), &source);

        let records = collect(&mut fetcher).await;

        assert_eq!(records.len(), 3);
        assert!(!records[0].is_success());
        assert!(!records[1].is_success());
        assert!(records[2].is_success());
        assert_eq!(records[2].price, 1.25);
    }

    #[tokio::test]
    async fn symbol_casing_is_preserved_end_to_end() {
        let source = ScriptedSource::new(vec![]);
        let mut fetcher = PriceFetcher::new(symbols(&["btcusdt"]), &source);

        let record = fetcher.next_record().await.expect("one record");

        assert_eq!(record.symbol, "btcusdt");
        assert_eq!(source.calls(), ["btcusdt"]);
    }
}
