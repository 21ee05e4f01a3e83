use chrono::NaiveTime;
use voltrack_core::volume::entity::{MarketSession, MarketStatus, SessionLabel, SlotTime};

/// 常规交易开盘 09:30
pub const MARKET_OPEN_MINUTES: u32 = 9 * 60 + 30;
/// 常规交易收盘 16:00
pub const MARKET_CLOSE_MINUTES: u32 = 16 * 60;
/// 展示层的盘前起点 04:00
pub const PRE_MARKET_DISPLAY_START_MINUTES: u32 = 4 * 60;

/// # Summary
/// 判定某一分钟所处的逻辑交易时段。
///
/// # Logic
/// - `[09:30, 16:00)` 为常规交易。
/// - 开盘前的任意时刻均视为盘前。
/// - `[16:00, 24:00)` 为盘后。
pub fn market_status(time: SlotTime) -> MarketStatus {
    let minutes = time.minutes();
    if minutes < MARKET_OPEN_MINUTES {
        MarketStatus::PreMarket
    } else if minutes < MARKET_CLOSE_MINUTES {
        MarketStatus::Open
    } else {
        MarketStatus::AfterHours
    }
}

/// # Summary
/// 面向展示的时段标签，04:00 之前不算盘前。
pub fn session_label(time: SlotTime) -> SessionLabel {
    match (market_status(time), time.minutes() >= PRE_MARKET_DISPLAY_START_MINUTES) {
        (MarketStatus::PreMarket, true) => SessionLabel::PreMarket,
        (MarketStatus::Open, _) => SessionLabel::MarketOpen,
        _ => SessionLabel::AfterMarket,
    }
}

/// # Summary
/// 时段分类器：时间戳到时段判定结果的纯函数。
///
/// # Arguments
/// * `now`: 交易所本地时刻，秒级部分被忽略。
///
/// # Returns
/// 三个时段标志恰有一个为真的 `MarketSession`。
pub fn classify(now: NaiveTime) -> MarketSession {
    let time = SlotTime::from_naive_time(now);
    let status = market_status(time);
    MarketSession {
        is_market_open: status == MarketStatus::Open,
        is_pre_market: status == MarketStatus::PreMarket,
        is_after_market: status == MarketStatus::AfterHours,
        status,
        label: session_label(time),
    }
}
