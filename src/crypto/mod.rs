//! Crypto price resolution and caching

pub mod directory;
pub mod price_cache;
pub mod ranking;
pub mod resolver;
pub mod search;
pub mod service;
pub mod symbol;

#[cfg(test)]
pub(crate) mod test_support;

pub use service::PriceService;
pub use symbol::symbol_from_asset_name;
