use serde::{Deserialize, Serialize};

pub mod magnitude;
pub mod time;

/// # Summary
/// 证券标的实体，代表当前正在跟踪成交量的股票。
///
/// # Invariants
/// - `symbol` 始终为去除首尾空白后的大写形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    // 股票代码 (例如: AAPL)
    pub symbol: String,
    // 交易所代码 (可选，例如: NASDAQ)
    pub exchange: Option<String>,
}

impl Stock {
    /// # Summary
    /// 根据用户输入的代码构造标的。
    ///
    /// # Logic
    /// 1. 去除首尾空白。
    /// 2. 统一转换为大写，与输入层的展示习惯保持一致。
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            exchange: None,
        }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.exchange {
            Some(exchange) => write!(f, "{}:{}", exchange, self.symbol),
            None => write!(f, "{}", self.symbol),
        }
    }
}
