//! Core business logic abstractions

pub mod cache;
pub mod clock;
pub mod coin;
pub mod config;
pub mod ledger;
pub mod log;
pub mod vault;

// Re-export main types for cleaner imports
pub use coin::CoinMarketApi;
pub use vault::RecordStore;
