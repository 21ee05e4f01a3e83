use voltrack_core::volume::entity::{MarketStatus, SlotTime, TimeSlot};

use crate::session::market_status;

/// 网格起点 08:00
pub const GRID_START_MINUTES: u32 = 8 * 60;
/// 网格终点 16:55 (含)
pub const GRID_END_MINUTES: u32 = 16 * 60 + 55;
/// 时段间隔 (分钟)
pub const SLOT_MINUTES: u32 = 5;

/// # Summary
/// 将一个时刻包装为带时段标志的 `TimeSlot`。
pub fn time_slot_at(time: SlotTime) -> TimeSlot {
    let status = market_status(time);
    TimeSlot {
        time,
        is_pre_market: status == MarketStatus::PreMarket,
        is_after_market: status == MarketStatus::AfterHours,
        is_market_hours: status == MarketStatus::Open,
    }
}

/// # Summary
/// 生成交易日的标准 5 分钟时间网格。
///
/// # Logic
/// 1. 从 08:00 起以 5 分钟步进，直到 16:55 (含)。
/// 2. 每个时段按时段分类器打上盘前/盘中/盘后标志。
///
/// # Returns
/// 升序排列的 108 个时段。
pub fn generate_time_slots() -> Vec<TimeSlot> {
    (GRID_START_MINUTES..=GRID_END_MINUTES)
        .step_by(5)
        .filter_map(SlotTime::from_minutes)
        .map(time_slot_at)
        .collect()
}

/// 判断某时刻是否落在时间网格上
pub fn is_on_grid(time: SlotTime) -> bool {
    let minutes = time.minutes();
    (GRID_START_MINUTES..=GRID_END_MINUTES).contains(&minutes) && minutes % SLOT_MINUTES == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spans_pre_market_to_after_hours() {
        let slots = generate_time_slots();
        assert_eq!(slots.len(), 108);
        assert_eq!(slots.first().unwrap().time.to_string(), "08:00");
        assert_eq!(slots.last().unwrap().time.to_string(), "16:55");
        assert!(slots.windows(2).all(|w| w[1].time.minutes() - w[0].time.minutes() == 5));
    }

    #[test]
    fn test_grid_session_flags() {
        let slots = generate_time_slots();
        for slot in &slots {
            assert_eq!(slot.is_market_hours, !slot.is_pre_market && !slot.is_after_market);
        }
        assert_eq!(slots.iter().filter(|s| s.is_pre_market).count(), 18);
        assert_eq!(slots.iter().filter(|s| s.is_market_hours).count(), 78);
        assert_eq!(slots.iter().filter(|s| s.is_after_market).count(), 12);

        let open = slots.iter().find(|s| s.time.to_string() == "09:30").unwrap();
        assert!(open.is_market_hours);
        let close = slots.iter().find(|s| s.time.to_string() == "16:00").unwrap();
        assert!(close.is_after_market);
    }

    #[test]
    fn test_is_on_grid() {
        assert!(is_on_grid("08:00".parse().unwrap()));
        assert!(is_on_grid("16:55".parse().unwrap()));
        assert!(!is_on_grid("10:03".parse().unwrap()));
        assert!(!is_on_grid("07:55".parse().unwrap()));
        assert!(!is_on_grid("17:00".parse().unwrap()));
    }
}
