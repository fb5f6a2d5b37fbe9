use serde::{Deserialize, Serialize};

/// Fear & Greed reading as published by alternative.me
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FearGreedIndex {
    /// 0 (extreme fear) to 100 (extreme greed)
    pub value: u8,
    pub classification: String,
    /// Unix seconds
    pub timestamp: i64,
}
