//! Market-data venue adapters.

mod bybit;

pub use bybit::BybitAdapter;
