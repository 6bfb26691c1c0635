use crate::data_source::FetchError;
use crate::UtcDateTime;

/// Sentinel symbol emitted for an empty input line.
pub const EMPTY_SYMBOL: &str = "n/a";

/// Return code indicating a successful lookup.
pub const RET_CODE_OK: i32 = 0;

/// Synthetic return code for transport and decode failures that carry no
/// upstream status of their own.
pub const RET_CODE_UNKNOWN: i32 = -1;

/// Per-symbol lookup outcome, one per input line.
///
/// `price` is only meaningful when `ret_code == RET_CODE_OK`; failure records
/// keep it at zero. The symbol is carried exactly as it appeared in the input,
/// never normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub symbol: String,
    pub price: f64,
    pub as_of: UtcDateTime,
    pub ret_code: i32,
    pub ret_msg: Option<String>,
    /// Underlying transport/decode error, kept for diagnostics only.
    pub cause: Option<FetchError>,
}

impl PriceRecord {
    /// Record for a successfully fetched price.
    pub fn success(symbol: impl Into<String>, price: f64, as_of: UtcDateTime) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            as_of,
            ret_code: RET_CODE_OK,
            ret_msg: None,
            cause: None,
        }
    }

    /// Skip marker for an empty input line: a success with the sentinel
    /// symbol and a zero price, not a failure.
    pub fn skipped(as_of: UtcDateTime) -> Self {
        Self::success(EMPTY_SYMBOL, 0.0, as_of)
    }

    /// Record for a failed lookup.
    pub fn failure(
        symbol: impl Into<String>,
        ret_code: i32,
        ret_msg: impl Into<String>,
        as_of: UtcDateTime,
        cause: Option<FetchError>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price: 0.0,
            as_of,
            ret_code,
            ret_msg: Some(ret_msg.into()),
            cause,
        }
    }

    pub const fn is_success(&self) -> bool {
        self.ret_code == RET_CODE_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_marker_is_a_success_with_sentinel_symbol() {
        let record = PriceRecord::skipped(UtcDateTime::now());
        assert!(record.is_success());
        assert_eq!(record.symbol, EMPTY_SYMBOL);
        assert_eq!(record.price, 0.0);
        assert!(record.ret_msg.is_none());
    }

    #[test]
    fn failure_keeps_upstream_code_and_message() {
        let record = PriceRecord::failure(
            "BADSYM",
            10001,
            "Not supported symbols",
            UtcDateTime::now(),
            None,
        );
        assert!(!record.is_success());
        assert_eq!(record.ret_code, 10001);
        assert_eq!(record.ret_msg.as_deref(), Some("Not supported symbols"));
    }

    #[test]
    fn symbol_is_not_normalized() {
        let record = PriceRecord::success("btcUsdt", 1.0, UtcDateTime::now());
        assert_eq!(record.symbol, "btcUsdt");
    }
}
