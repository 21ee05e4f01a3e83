use tracing::warn;
use voltrack_core::volume::entity::{
    ChartPoint, Projection, ProjectionMode, ProjectionSummary, SlotTime,
};

use crate::distribution::{fraction_as_of, regular_anchors};

/// # Summary
/// 单值模式推算：以当前累计成交量整体缩放期望曲线。
///
/// # Logic
/// 1. 取 "截至当前" 的期望占比 `current_pct`（开盘前 0.12，收盘后 1.0）。
/// 2. `current_pct <= 0` 或尚未输入当前成交量时无法推算，实际值全部为 None。
/// 3. 对每个分布锚点 `p`：推算值 = `(current_volume / current_pct) * p`，期望值 = `均量 * p`，均取整。
///
/// # Arguments
/// * `average_daily_volume`: 50 日均量。
/// * `current_volume`: 截至 `now` 的累计成交量。
/// * `now`: 交易所本地时刻。
///
/// # Returns
/// 与 14 个分布锚点一一对应的图表点。
pub fn project_scalar(average_daily_volume: f64, current_volume: f64, now: SlotTime) -> Projection {
    let current_pct = fraction_as_of(now);
    if current_pct <= 0.0 {
        warn!("Expected fraction at {} is not positive, scalar projection skipped", now);
    }
    let pace_multiplier =
        (current_volume > 0.0 && current_pct > 0.0).then(|| current_volume / current_pct);

    let points = regular_anchors()
        .map(|anchor| ChartPoint {
            time: anchor.time,
            expected_cumulative: Some((average_daily_volume * anchor.cumulative_fraction).round()),
            actual_cumulative: pace_multiplier
                .map(|multiplier| (multiplier * anchor.cumulative_fraction).round()),
            is_pre_market: false,
            is_after_market: false,
        })
        .collect();

    let summary = pace_multiplier.map(|projected| ProjectionSummary {
        projected_daily_volume: projected.round(),
        volume_ratio: (average_daily_volume > 0.0).then(|| projected / average_daily_volume),
        last_observed: None,
        manual_target: false,
    });

    Projection {
        mode: ProjectionMode::Scalar,
        points,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> SlotTime {
        label.parse().unwrap()
    }

    fn point<'a>(projection: &'a Projection, label: &str) -> &'a ChartPoint {
        projection
            .points
            .iter()
            .find(|p| p.time.to_string() == label)
            .unwrap()
    }

    #[test]
    fn test_noon_scenario() {
        let projection = project_scalar(50_000_000.0, 19_500_000.0, slot("12:00"));
        assert_eq!(projection.points.len(), 14);
        assert_eq!(point(&projection, "12:00").expected_cumulative, Some(19_500_000.0));
        assert_eq!(point(&projection, "16:00").actual_cumulative, Some(50_000_000.0));

        let summary = projection.summary.unwrap();
        assert_eq!(summary.projected_daily_volume, 50_000_000.0);
        assert!((summary.volume_ratio.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_on_pace_reading_reproduces_expected_curve() {
        let average = 40_000_000.0;
        for label in ["09:30", "10:00", "11:30", "13:00", "15:30"] {
            let now = slot(label);
            let current = average * fraction_as_of(now);
            let projection = project_scalar(average, current, now);
            for p in &projection.points {
                assert_eq!(p.actual_cumulative, p.expected_cumulative, "now={} at {}", label, p.time);
            }
        }
    }

    #[test]
    fn test_heavy_morning_doubles_curve() {
        // 10:00 已成交 2000 万，期望 1000 万，全天推算 1 亿
        let projection = project_scalar(50_000_000.0, 20_000_000.0, slot("10:00"));
        assert_eq!(point(&projection, "16:00").actual_cumulative, Some(100_000_000.0));
        assert_eq!(point(&projection, "09:30").actual_cumulative, Some(12_000_000.0));
    }

    #[test]
    fn test_before_open_uses_first_anchor() {
        let projection = project_scalar(50_000_000.0, 1_200_000.0, slot("08:15"));
        assert_eq!(point(&projection, "16:00").actual_cumulative, Some(10_000_000.0));
    }

    #[test]
    fn test_after_close_uses_full_day() {
        let projection = project_scalar(50_000_000.0, 61_000_000.0, slot("17:30"));
        assert_eq!(point(&projection, "16:00").actual_cumulative, Some(61_000_000.0));
        assert_eq!(point(&projection, "12:00").actual_cumulative, Some(23_790_000.0));
    }

    #[test]
    fn test_missing_reading_yields_no_actuals() {
        let projection = project_scalar(50_000_000.0, 0.0, slot("12:00"));
        assert!(projection.points.iter().all(|p| p.actual_cumulative.is_none()));
        assert!(projection.points.iter().all(|p| p.expected_cumulative.is_some()));
        assert!(projection.summary.is_none());
    }

    #[test]
    fn test_between_anchors_uses_next_anchor_fraction() {
        // 11:15 取 11:30 的 0.35，1750 万正好是期望节奏
        let projection = project_scalar(50_000_000.0, 17_500_000.0, slot("11:15"));
        assert_eq!(point(&projection, "16:00").actual_cumulative, Some(50_000_000.0));
        assert_eq!(point(&projection, "11:00").actual_cumulative, Some(15_500_000.0));
    }
}
