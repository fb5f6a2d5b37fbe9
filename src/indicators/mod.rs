pub mod momentum;
pub mod trend;

pub use momentum::{calculate_rsi, calculate_rsi_default, DEFAULT_RSI_PERIOD};
pub use trend::calculate_sma;
