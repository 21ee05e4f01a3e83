use chrono::NaiveTime;
use voltrack_core::volume::entity::{
    ChartPoint, Observations, Projection, ProjectionMode, ProjectionRequest, SlotTime,
};
use voltrack_core::volume::port::VolumeProjector;
use voltrack_projection::service::ProjectionService;

const AVERAGE: f64 = 50_000_000.0;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn slot(label: &str) -> SlotTime {
    label.parse().unwrap()
}

fn point<'a>(projection: &'a Projection, label: &str) -> &'a ChartPoint {
    projection
        .points
        .iter()
        .find(|p| p.time == slot(label))
        .unwrap_or_else(|| panic!("no point at {}", label))
}

fn granular(
    overrides: &[(&str, f64)],
    manual_daily_volume: Option<f64>,
) -> ProjectionRequest {
    ProjectionRequest {
        average_daily_volume: AVERAGE,
        now: at(12, 0),
        observations: Observations::Granular {
            overrides: overrides.iter().map(|(label, v)| (slot(label), *v)).collect(),
            manual_daily_volume,
        },
    }
}

// 09:30 - 10:00 全部录入，合计 300 万
fn first_half_hour() -> Vec<(&'static str, f64)> {
    vec![
        ("09:30", 1_200_000.0),
        ("09:35", 300_000.0),
        ("09:40", 300_000.0),
        ("09:45", 300_000.0),
        ("09:50", 300_000.0),
        ("09:55", 300_000.0),
        ("10:00", 300_000.0),
    ]
}

#[test]
fn test_scalar_noon_scenario_through_service() {
    let service = ProjectionService::new();
    let request = ProjectionRequest {
        average_daily_volume: AVERAGE,
        now: at(12, 0),
        observations: Observations::Scalar {
            current_volume: 19_500_000.0,
        },
    };
    let projection = service.project(&request);

    assert_eq!(projection.mode, ProjectionMode::Scalar);
    assert_eq!(projection.points.len(), 14);
    assert_eq!(point(&projection, "12:00").expected_cumulative, Some(19_500_000.0));
    assert_eq!(point(&projection, "16:00").actual_cumulative, Some(50_000_000.0));
    assert_eq!(service.expected_volume_now(AVERAGE, at(12, 0)), 19_500_000.0);
}

#[test]
fn test_granular_without_observations_tracks_expected() {
    let service = ProjectionService::new();
    let projection = service.project(&granular(&[], None));

    assert_eq!(projection.points.len(), service.time_grid().len());
    for (slot, p) in service.time_grid().iter().zip(&projection.points) {
        assert_eq!(slot.time, p.time);
        if slot.is_market_hours {
            assert!(p.expected_cumulative.is_some());
            assert_eq!(p.actual_cumulative, p.expected_cumulative);
        } else {
            assert_eq!(p.expected_cumulative, None);
            assert_eq!(p.actual_cumulative, None);
        }
    }
    assert_eq!(projection.summary.unwrap().projected_daily_volume, AVERAGE);
}

#[test]
fn test_granular_full_first_half_hour_projects_lower_day() {
    let service = ProjectionService::new();
    let projection = service.project(&granular(&first_half_hour(), None));

    let summary = projection.summary.unwrap();
    assert!((summary.volume_ratio.unwrap() - 0.30).abs() < 1e-9);
    assert!((summary.projected_daily_volume - 15_000_000.0).abs() < 1e-3);
    assert_eq!(summary.last_observed, Some(slot("10:00")));
    assert!(!summary.manual_target);

    // 观测段是真实累计值
    assert_eq!(point(&projection, "09:30").actual_cumulative, Some(1_200_000.0));
    assert_eq!(point(&projection, "10:00").actual_cumulative, Some(3_000_000.0));
    // 距离 1：仅向推算曲线靠拢 1/12
    assert_eq!(point(&projection, "10:05").actual_cumulative, Some(3_012_500.0));
    // 距离 12：完全落在推算曲线上
    assert_eq!(point(&projection, "11:00").actual_cumulative, Some(4_650_000.0));
    assert_eq!(point(&projection, "15:55").actual_cumulative, Some(14_200_000.0));
    // 16:00 属于盘后
    assert_eq!(point(&projection, "16:00").actual_cumulative, None);
}

#[test]
fn test_granular_fills_expected_before_first_observation() {
    let service = ProjectionService::new();
    let projection = service.project(&granular(&[("10:00", 3_000_000.0)], None));

    // 09:30 - 09:55 以期望单段量填充
    assert_eq!(
        point(&projection, "09:55").actual_cumulative,
        point(&projection, "09:55").expected_cumulative
    );
    // 展示曲线含填充量
    assert_eq!(point(&projection, "10:00").actual_cumulative, Some(12_333_333.0));

    // 节奏比例只反映真实观测：3M / 10M
    let summary = projection.summary.unwrap();
    assert!((summary.volume_ratio.unwrap() - 0.30).abs() < 1e-9);
    assert!((summary.projected_daily_volume - 15_000_000.0).abs() < 1e-3);
    assert_eq!(summary.last_observed, Some(slot("10:00")));

    // 10:05 从 12,333,333 向 15M * 0.21 = 3,150,000 过渡 1/12
    assert_eq!(point(&projection, "10:05").actual_cumulative, Some(11_568_056.0));
    // 11:00 完全落在推算曲线上: 15M * 0.31
    assert_eq!(point(&projection, "11:00").actual_cumulative, Some(4_650_000.0));
}

#[test]
fn test_manual_daily_target_wins_over_ratio() {
    let service = ProjectionService::new();
    let projection = service.project(&granular(&first_half_hour(), Some(80_000_000.0)));

    let summary = projection.summary.unwrap();
    assert!(summary.manual_target);
    assert_eq!(summary.projected_daily_volume, 80_000_000.0);
    assert_eq!(point(&projection, "10:05").actual_cumulative, Some(4_150_000.0));
    assert_eq!(point(&projection, "15:55").actual_cumulative, Some(75_733_333.0));
}

#[test]
fn test_zero_manual_target_falls_back_to_ratio() {
    let service = ProjectionService::new();
    let projection = service.project(&granular(&first_half_hour(), Some(0.0)));

    let summary = projection.summary.unwrap();
    assert!(!summary.manual_target);
    assert!((summary.projected_daily_volume - 15_000_000.0).abs() < 1e-3);
}

#[test]
fn test_off_session_overrides_are_ignored() {
    let service = ProjectionService::new();
    let with_context = service.project(&granular(&[("08:30", 900_000.0), ("16:10", 2_000_000.0)], None));
    let without = service.project(&granular(&[], None));

    assert_eq!(with_context.points, without.points);
    assert_eq!(with_context.summary.unwrap().last_observed, None);
}

#[test]
fn test_later_observation_moves_smoothing_anchor() {
    let service = ProjectionService::new();
    let mut overrides = first_half_hour();
    overrides.push(("11:00", 500_000.0));
    let projection = service.project(&granular(&overrides, None));

    // 10:05 - 10:55 未录入，位于 L 之前，保持 10:00 的累计值
    assert_eq!(point(&projection, "10:30").actual_cumulative, Some(3_000_000.0));
    assert_eq!(point(&projection, "11:00").actual_cumulative, Some(3_500_000.0));
    assert_eq!(projection.summary.unwrap().last_observed, Some(slot("11:00")));
}

#[test]
fn test_pace_and_slot_guide_through_service() {
    let service = ProjectionService::new();

    let pace = service.pace(AVERAGE, 26_000_000.0, at(12, 0)).unwrap();
    assert_eq!(pace.expected_volume, 19_500_000.0);
    assert_eq!(pace.description(), "+33.3% above expected");

    let guide = service.slot_guide(AVERAGE);
    assert_eq!(guide.len(), service.time_grid().len());
    let session = service.classify(at(9, 45));
    assert!(session.is_market_open);
}

#[test]
fn test_every_call_is_recomputed_from_scratch() {
    let service = ProjectionService::new();
    let request = granular(&first_half_hour(), None);
    let first = service.project(&request);
    let _other = service.project(&granular(&[("12:00", 9_000_000.0)], Some(1.0)));
    let again = service.project(&request);
    assert_eq!(first, again);
}
