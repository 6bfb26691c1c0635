//! Market-data collaborator contract.
//!
//! The pipeline talks to the outside world through a single capability:
//! fetch the latest spot ticker for one symbol. A lookup can end three ways,
//! and the distinction matters downstream:
//!
//! - `Ok` with `ret_code == 0`: a price was obtained;
//! - `Ok` with a non-zero `ret_code`: the venue answered with a failure of
//!   its own (unknown symbol, bad request); the code and message are the
//!   venue's;
//! - `Err(FetchError)`: the call itself broke (transport, malformed body).

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

/// Structured ticker response from the market-data venue.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotTicker {
    pub ret_code: i32,
    pub ret_msg: String,
    /// Last traded price; present only when `ret_code == 0`.
    pub last_price: Option<f64>,
}

impl SpotTicker {
    pub const fn is_ok(&self) -> bool {
        self.ret_code == 0
    }
}

/// Classification of a failed lookup call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request never produced a usable HTTP response.
    Transport,
    /// The response arrived but could not be decoded into a ticker.
    MalformedResponse,
}

/// Error raised when a lookup call breaks before yielding a ticker.
///
/// `ret_code` carries a status code recovered from a partially decoded
/// response when one was obtained before the failure; absent that, consumers
/// fall back to a synthetic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    ret_code: Option<i32>,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
            ret_code: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::MalformedResponse,
            message: message.into(),
            ret_code: None,
        }
    }

    pub fn with_ret_code(mut self, ret_code: i32) -> Self {
        self.ret_code = Some(ret_code);
        self
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn ret_code(&self) -> Option<i32> {
        self.ret_code
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

/// Spot market-data source contract.
///
/// Implementations must be `Send + Sync`; the trait uses boxed futures so it
/// stays object-safe behind `&dyn SpotSource`.
pub trait SpotSource: Send + Sync {
    /// Fetch the latest spot ticker for one symbol.
    fn fetch_spot<'a>(
        &'a self,
        symbol: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<SpotTicker, FetchError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_has_no_recoverable_code() {
        let err = FetchError::transport("connection refused");
        assert_eq!(err.kind(), FetchErrorKind::Transport);
        assert_eq!(err.ret_code(), None);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn recovered_code_is_carried_through() {
        let err = FetchError::malformed("truncated body").with_ret_code(10001);
        assert_eq!(err.ret_code(), Some(10001));
    }
}
