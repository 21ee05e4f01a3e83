use std::collections::BTreeMap;

use tracing::{debug, warn};
use voltrack_core::volume::entity::{
    ChartPoint, Projection, ProjectionMode, ProjectionSummary, SlotTime, TimeSlot,
};

use crate::distribution::{cumulative_fraction_at, individual_fraction_at};

/// 平滑窗口：最后一次观测后 12 个时段 (1 小时) 内逐步过渡到推算曲线
pub const SMOOTHING_SLOTS: u32 = 12;

/// # Summary
/// 时段相对最后一次观测 `L` 所处的阶段。
///
/// # Invariants
/// - 不保存任何状态，每个输出点按自身下标与 `L` 的距离独立判定。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    // 没有任何观测
    NoData,
    // 下标 <= L：输出重建的累计值
    Accumulating,
    // L 之后一小时内：按系数混合
    SmoothingToProjection(f64),
    // 系数达到 1：完全采用推算曲线
    SteadyProjection,
}

impl Segment {
    pub fn of(index: usize, last_observed: Option<usize>) -> Self {
        match last_observed {
            None => Segment::NoData,
            Some(last) if index <= last => Segment::Accumulating,
            Some(last) => {
                let factor = smoothing_factor(index - last);
                if factor < 1.0 {
                    Segment::SmoothingToProjection(factor)
                } else {
                    Segment::SteadyProjection
                }
            }
        }
    }
}

/// # Summary
/// 平滑系数 `min(distance / 12, 1)`，距离 12 个时段及以上时恒为 1。
pub fn smoothing_factor(distance: usize) -> f64 {
    let distance = u32::try_from(distance).unwrap_or(u32::MAX);
    (f64::from(distance) / f64::from(SMOOTHING_SLOTS)).min(1.0)
}

// 期望累计成交量，仅常规交易时段有值
fn expected_cumulative(slot: &TimeSlot, average_daily_volume: f64) -> Option<f64> {
    if !slot.is_market_hours {
        return None;
    }
    cumulative_fraction_at(slot.time).map(|fraction| (average_daily_volume * fraction).round())
}

/// # Summary
/// 分时模式推算。
///
/// # Logic
/// 1. 累计量重建：按网格顺序遍历常规时段，有观测则累加观测值；
///    在首个观测出现之前，以期望单段量填充（视为按期望节奏成交）。记录最后一个观测的下标 `L`。
///    填充量只进入展示用的累计曲线，另行累计仅含真实观测的总量。
/// 2. 无任何观测时，所有常规时段的实际值等于期望值。
/// 3. 节奏比例 = 真实观测总量 / 期望累计量(L)；期望累计量不大于 0 时不推算。
///    全天推算量优先采用人工目标量 (> 0)，否则为 `均量 * 比例`。
/// 4. 下标 <= L 输出重建累计量；之后按 `L + (推算值 - L) * 平滑系数` 混合。
/// 5. 盘前与盘后时段仅作为上下文行，期望值与实际值均为 None。
///
/// # Arguments
/// * `grid`: 交易日时间网格。
/// * `average_daily_volume`: 50 日均量。
/// * `overrides`: 各时段的单段成交量观测，盘前/盘后的观测不参与计算。
/// * `manual_daily_volume`: 可选的全天目标量。
///
/// # Returns
/// 与网格一一对应的图表点。
pub fn project_granular(
    grid: &[TimeSlot],
    average_daily_volume: f64,
    overrides: &BTreeMap<SlotTime, f64>,
    manual_daily_volume: Option<f64>,
) -> Projection {
    // 1. 累计量重建
    let mut cumulative_actual = 0.0;
    let mut observed_total = 0.0;
    let mut last_observed: Option<usize> = None;
    let mut running = Vec::with_capacity(grid.len());
    for (idx, slot) in grid.iter().enumerate() {
        if slot.is_market_hours {
            match overrides.get(&slot.time) {
                Some(volume) => {
                    cumulative_actual += volume;
                    observed_total += volume;
                    last_observed = Some(idx);
                }
                None if last_observed.is_none() => {
                    cumulative_actual += average_daily_volume
                        * individual_fraction_at(slot.time).unwrap_or(0.0);
                }
                None => {}
            }
        }
        running.push(cumulative_actual);
    }

    // 2. 无观测：按期望节奏
    let Some(last) = last_observed else {
        debug!("No intraday observations, assuming on-pace trading");
        let points = grid
            .iter()
            .map(|slot| {
                let expected = expected_cumulative(slot, average_daily_volume);
                ChartPoint {
                    time: slot.time,
                    expected_cumulative: expected,
                    actual_cumulative: expected,
                    is_pre_market: slot.is_pre_market,
                    is_after_market: slot.is_after_market,
                }
            })
            .collect();
        return Projection {
            mode: ProjectionMode::Granular,
            points,
            summary: Some(ProjectionSummary {
                projected_daily_volume: average_daily_volume,
                volume_ratio: (average_daily_volume > 0.0).then_some(1.0),
                last_observed: None,
                manual_target: false,
            }),
        };
    };

    // 3. 节奏比例与全天推算量
    let last_slot = grid[last];
    let actual_at_last = running[last];
    let expected_at_last = cumulative_fraction_at(last_slot.time)
        .map(|fraction| fraction * average_daily_volume)
        .unwrap_or(0.0);

    let summary = if expected_at_last > 0.0 {
        let volume_ratio = observed_total / expected_at_last;
        let manual = manual_daily_volume.filter(|volume| *volume > 0.0);
        Some(ProjectionSummary {
            projected_daily_volume: manual.unwrap_or(average_daily_volume * volume_ratio),
            volume_ratio: Some(volume_ratio),
            last_observed: Some(last_slot.time),
            manual_target: manual.is_some(),
        })
    } else {
        warn!(
            "Expected cumulative volume at {} is not positive, projection after last observation suppressed",
            last_slot.time
        );
        None
    };
    let projected_daily_volume = summary.map(|s| s.projected_daily_volume);

    // 4. 观测段与平滑段
    let points = grid
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let expected = expected_cumulative(slot, average_daily_volume);
            let actual = if !slot.is_market_hours {
                None
            } else {
                match Segment::of(idx, Some(last)) {
                    Segment::NoData | Segment::Accumulating => Some(running[idx].round()),
                    Segment::SmoothingToProjection(factor) => {
                        blend(slot, actual_at_last, projected_daily_volume, factor)
                    }
                    Segment::SteadyProjection => {
                        blend(slot, actual_at_last, projected_daily_volume, 1.0)
                    }
                }
            };
            ChartPoint {
                time: slot.time,
                expected_cumulative: expected,
                actual_cumulative: actual,
                is_pre_market: slot.is_pre_market,
                is_after_market: slot.is_after_market,
            }
        })
        .collect();

    debug!(
        "Granular projection: last observation at {}, projected daily {:?}",
        last_slot.time, projected_daily_volume
    );

    Projection {
        mode: ProjectionMode::Granular,
        points,
        summary,
    }
}

// 最后观测值与推算曲线之间的线性混合。
// 推算曲线取未取整的分布占比，与取整后的期望值相差不足 1 股。
fn blend(
    slot: &TimeSlot,
    actual_at_last: f64,
    projected_daily_volume: Option<f64>,
    factor: f64,
) -> Option<f64> {
    let projected_value = projected_daily_volume? * cumulative_fraction_at(slot.time)?;
    Some((actual_at_last + (projected_value - actual_at_last) * factor).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::generate_time_slots;

    #[test]
    fn test_smoothing_factor_ramp() {
        assert_eq!(smoothing_factor(0), 0.0);
        assert!((smoothing_factor(1) - 1.0 / 12.0).abs() < 1e-12);
        assert!((smoothing_factor(6) - 0.5).abs() < 1e-12);
        assert_eq!(smoothing_factor(12), 1.0);
        assert_eq!(smoothing_factor(40), 1.0);
        assert_eq!(smoothing_factor(usize::MAX), 1.0);
    }

    #[test]
    fn test_segment_transitions() {
        assert_eq!(Segment::of(5, None), Segment::NoData);
        assert_eq!(Segment::of(5, Some(10)), Segment::Accumulating);
        assert_eq!(Segment::of(10, Some(10)), Segment::Accumulating);
        assert!(matches!(Segment::of(11, Some(10)), Segment::SmoothingToProjection(_)));
        assert_eq!(Segment::of(22, Some(10)), Segment::SteadyProjection);
    }

    #[test]
    fn test_pre_and_after_market_rows_are_empty() {
        let grid = generate_time_slots();
        let mut overrides = BTreeMap::new();
        overrides.insert("10:00".parse().unwrap(), 3_000_000.0);
        let projection = project_granular(&grid, 50_000_000.0, &overrides, None);

        for (slot, point) in grid.iter().zip(&projection.points) {
            if !slot.is_market_hours {
                assert!(point.expected_cumulative.is_none(), "{}", slot.time);
                assert!(point.actual_cumulative.is_none(), "{}", slot.time);
            }
        }
    }

    #[test]
    fn test_zero_average_keeps_observed_segment_only() {
        let grid = generate_time_slots();
        let mut overrides = BTreeMap::new();
        overrides.insert("09:45".parse().unwrap(), 1_000.0);
        let projection = project_granular(&grid, 0.0, &overrides, Some(5_000_000.0));

        assert!(projection.summary.is_none());
        let observed = projection
            .points
            .iter()
            .find(|p| p.time.to_string() == "09:45")
            .unwrap();
        assert_eq!(observed.actual_cumulative, Some(1_000.0));
        let after = projection
            .points
            .iter()
            .find(|p| p.time.to_string() == "09:50")
            .unwrap();
        assert_eq!(after.actual_cumulative, None);
    }

    #[test]
    fn test_filler_is_excluded_from_ratio() {
        let grid = generate_time_slots();
        let mut overrides = BTreeMap::new();
        overrides.insert("10:00".parse().unwrap(), 3_000_000.0);
        let projection = project_granular(&grid, 50_000_000.0, &overrides, None);

        // 3M 实际 / 10M 期望，09:30 - 09:55 的填充量不计入
        let summary = projection.summary.unwrap();
        assert!((summary.volume_ratio.unwrap() - 0.30).abs() < 1e-9);
        assert!((summary.projected_daily_volume - 15_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_steady_segment_uses_unrounded_fraction() {
        let grid = generate_time_slots();
        let mut overrides = BTreeMap::new();
        overrides.insert("09:30".parse().unwrap(), 9_000_000.0);
        let projection = project_granular(&grid, 50_000_000.0, &overrides, None);
        let projected = projection.summary.unwrap().projected_daily_volume;

        let steady = grid
            .iter()
            .zip(&projection.points)
            .skip_while(|(slot, _)| slot.time.to_string() != "10:30")
            .filter(|(slot, _)| slot.is_market_hours);
        for (slot, point) in steady {
            let fraction = cumulative_fraction_at(slot.time).unwrap();
            assert_eq!(point.actual_cumulative, Some((projected * fraction).round()), "{}", slot.time);
        }
    }
}
