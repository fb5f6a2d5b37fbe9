//! External data collaborators: price history, spot price and sentiment.

pub mod error;
pub mod fear_greed;
pub mod kraken;
pub mod live_coin_watch;
pub mod market_data;

pub use error::FetchError;
pub use fear_greed::FearGreedClient;
pub use kraken::KrakenClient;
pub use live_coin_watch::LiveCoinWatchClient;
pub use market_data::{DailyPriceSource, SentimentSource, SpotPriceSource};
