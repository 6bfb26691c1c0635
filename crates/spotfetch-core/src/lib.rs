//! # Spotfetch Core
//!
//! Symbol source, resilient per-symbol fetch pipeline, and streaming report
//! writer behind the `spotfetch` binary.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Market-data venue adapters (Bybit V5) |
//! | [`data_source`] | Collaborator contract and fetch errors |
//! | [`domain`] | Domain types ([`PriceRecord`], [`UtcDateTime`]) |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | Sequential price fetch pipeline |
//! | [`report`] | Tab-separated streaming report writer |
//! | [`symbols`] | Symbol list file source |
//!
//! ## Pipeline contract
//!
//! One [`PriceRecord`] per input line, in input order, blank lines included.
//! A single symbol's failure never aborts the batch: venue rejections carry
//! the venue's own status code and message, broken calls are caught at the
//! symbol boundary and recorded with a synthetic code. Records stream to the
//! report as they are produced.

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod pipeline;
pub mod report;
pub mod symbols;

pub use adapters::BybitAdapter;
pub use data_source::{FetchError, FetchErrorKind, SpotSource, SpotTicker};
pub use domain::{PriceRecord, UtcDateTime, EMPTY_SYMBOL, RET_CODE_OK, RET_CODE_UNKNOWN};
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use pipeline::PriceFetcher;
pub use report::{ReportError, ReportWriter, REPORT_HEADER};
pub use symbols::{read_symbol_lines, FileAccessError};
