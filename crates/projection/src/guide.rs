use voltrack_core::volume::entity::{SlotGuide, TimeSlot};

use crate::distribution::{cumulative_fraction_at, individual_fraction_at, pre_market_individual_at};

/// # Summary
/// 为每个时段生成期望成交量提示。
///
/// # Logic
/// 1. 常规时段：单段量取分布曲线差分，累计量取插值。
/// 2. 盘前时段：单段量取盘前表差分，仅作参考，不参与推算。
/// 3. 盘后时段：无提示。
pub fn slot_guide(grid: &[TimeSlot], average_daily_volume: f64) -> Vec<SlotGuide> {
    grid.iter()
        .map(|slot| {
            let individual = if slot.is_market_hours {
                individual_fraction_at(slot.time)
            } else if slot.is_pre_market {
                pre_market_individual_at(slot.time)
            } else {
                None
            };
            let cumulative = if slot.is_market_hours {
                cumulative_fraction_at(slot.time)
            } else {
                None
            };
            SlotGuide {
                slot: *slot,
                expected_individual: individual.map(|f| (average_daily_volume * f).round()),
                expected_cumulative: cumulative.map(|f| (average_daily_volume * f).round()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::generate_time_slots;

    #[test]
    fn test_guide_covers_each_session() {
        let guide = slot_guide(&generate_time_slots(), 50_000_000.0);
        assert_eq!(guide.len(), 108);

        let at = |label: &str| guide.iter().find(|g| g.slot.time.to_string() == label).unwrap();
        assert_eq!(at("08:00").expected_individual, Some(50_000.0));
        assert_eq!(at("08:00").expected_cumulative, None);
        assert_eq!(at("09:30").expected_individual, Some(6_000_000.0));
        assert_eq!(at("09:30").expected_cumulative, Some(6_000_000.0));
        assert_eq!(at("16:30").expected_individual, None);
    }
}
