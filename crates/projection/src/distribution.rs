//! # 成交量分布曲线
//!
//! 两张固定的校准表：常规交易时段与盘前。表中记录截至某一时刻的累计成交量
//! 占 50 日均量的比例，来源于历史规律而非实时数据。

use voltrack_core::volume::entity::{DistributionPoint, SlotTime};

use crate::grid::SLOT_MINUTES;
use crate::session::{MARKET_CLOSE_MINUTES, MARKET_OPEN_MINUTES};

/// 常规交易时段锚点 (自零点起的分钟数, 累计占比)，16:00 为全天终点 1.0
const REGULAR_SESSION: [(u32, f64); 14] = [
    (9 * 60 + 30, 0.12),
    (10 * 60, 0.20),
    (10 * 60 + 30, 0.26),
    (11 * 60, 0.31),
    (11 * 60 + 30, 0.35),
    (12 * 60, 0.39),
    (12 * 60 + 30, 0.42),
    (13 * 60, 0.45),
    (13 * 60 + 30, 0.48),
    (14 * 60, 0.51),
    (14 * 60 + 30, 0.54),
    (15 * 60, 0.58),
    (15 * 60 + 30, 0.68),
    (16 * 60, 1.00),
];

/// 盘前锚点，已按 5 分钟网格给出，无需插值；盘前合计约占全天的 2.2%
const PRE_MARKET: [(u32, f64); 18] = [
    (8 * 60, 0.001),
    (8 * 60 + 5, 0.0015),
    (8 * 60 + 10, 0.002),
    (8 * 60 + 15, 0.0025),
    (8 * 60 + 20, 0.003),
    (8 * 60 + 25, 0.0035),
    (8 * 60 + 30, 0.005),
    (8 * 60 + 35, 0.006),
    (8 * 60 + 40, 0.007),
    (8 * 60 + 45, 0.008),
    (8 * 60 + 50, 0.009),
    (8 * 60 + 55, 0.01),
    (9 * 60, 0.012),
    (9 * 60 + 5, 0.014),
    (9 * 60 + 10, 0.016),
    (9 * 60 + 15, 0.018),
    (9 * 60 + 20, 0.02),
    (9 * 60 + 25, 0.022),
];

fn to_points(table: &'static [(u32, f64)]) -> impl Iterator<Item = DistributionPoint> {
    table.iter().filter_map(|(minutes, fraction)| {
        SlotTime::from_minutes(*minutes).map(|time| DistributionPoint {
            time,
            cumulative_fraction: *fraction,
        })
    })
}

/// 常规交易时段的锚点序列
pub fn regular_anchors() -> impl Iterator<Item = DistributionPoint> {
    to_points(&REGULAR_SESSION)
}

/// 盘前锚点序列
pub fn pre_market_anchors() -> impl Iterator<Item = DistributionPoint> {
    to_points(&PRE_MARKET)
}

/// 常规时段首个锚点 (09:30) 的占比
pub fn first_anchor_fraction() -> f64 {
    REGULAR_SESSION[0].1
}

/// # Summary
/// 计算任意时刻的期望累计成交量占比。
///
/// # Logic
/// 1. 时刻不在 `[09:30, 16:00]` 内时返回 None。
/// 2. 查找第一个不早于该时刻的锚点；若为首个锚点或恰好落在锚点上，直接返回其占比。
/// 3. 否则按经过分钟数在前后两个锚点之间线性插值。
/// 4. 超出最后一个锚点时返回 1.0。
///
/// # Arguments
/// * `time`: 查询时刻。
///
/// # Returns
/// 累计占比，位于 `[0.12, 1.0]`。
pub fn cumulative_fraction_at(time: SlotTime) -> Option<f64> {
    let minutes = time.minutes();
    if !(MARKET_OPEN_MINUTES..=MARKET_CLOSE_MINUTES).contains(&minutes) {
        return None;
    }

    let idx = REGULAR_SESSION.partition_point(|(anchor, _)| *anchor < minutes);
    if idx == 0 {
        return Some(REGULAR_SESSION[0].1);
    }
    let Some(&(next_minutes, next_fraction)) = REGULAR_SESSION.get(idx) else {
        return Some(1.0);
    };
    if next_minutes == minutes {
        return Some(next_fraction);
    }
    let (prev_minutes, prev_fraction) = REGULAR_SESSION[idx - 1];

    let ratio = f64::from(minutes - prev_minutes) / f64::from(next_minutes - prev_minutes);
    Some(prev_fraction + (next_fraction - prev_fraction) * ratio)
}

/// # Summary
/// 计算单个 5 分钟时段的期望成交量占比 (非累计)。
///
/// # Logic
/// 1. 取该时刻的累计占比，不在常规时段内则返回 None。
/// 2. 若前推 5 分钟已早于开盘，没有可减的前值，直接返回累计占比。
/// 3. 否则返回两者之差。
pub fn individual_fraction_at(time: SlotTime) -> Option<f64> {
    let cumulative = cumulative_fraction_at(time)?;
    let previous = time
        .checked_sub_minutes(SLOT_MINUTES)
        .filter(|prev| prev.minutes() >= MARKET_OPEN_MINUTES)
        .and_then(cumulative_fraction_at);
    Some(previous.map_or(cumulative, |prev| cumulative - prev))
}

/// 盘前表的直接查表，时刻不在表中时返回 None
pub fn pre_market_cumulative_at(time: SlotTime) -> Option<f64> {
    PRE_MARKET
        .iter()
        .find(|(minutes, _)| *minutes == time.minutes())
        .map(|(_, fraction)| *fraction)
}

/// # Summary
/// 盘前单个时段的期望占比，差分规则与常规时段一致，首个锚点 (08:00) 直接返回其值。
pub fn pre_market_individual_at(time: SlotTime) -> Option<f64> {
    let cumulative = pre_market_cumulative_at(time)?;
    let previous = time
        .checked_sub_minutes(SLOT_MINUTES)
        .and_then(pre_market_cumulative_at);
    Some(previous.map_or(cumulative, |prev| cumulative - prev))
}

/// # Summary
/// "截至当前" 的期望累计占比，用于单值模式与节奏评估。
///
/// # Logic
/// 1. 开盘前使用首个锚点的占比 (0.12)。
/// 2. 收盘及之后使用 1.0。
/// 3. 盘中取第一个不早于 `now` 的锚点的占比，不做插值。
pub fn fraction_as_of(now: SlotTime) -> f64 {
    let minutes = now.minutes();
    if minutes < MARKET_OPEN_MINUTES {
        first_anchor_fraction()
    } else if minutes >= MARKET_CLOSE_MINUTES {
        1.0
    } else {
        let idx = REGULAR_SESSION.partition_point(|(anchor, _)| *anchor < minutes);
        REGULAR_SESSION.get(idx).map_or(1.0, |(_, fraction)| *fraction)
    }
}
