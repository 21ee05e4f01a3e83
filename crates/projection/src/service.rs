use chrono::NaiveTime;
use tracing::debug;
use voltrack_core::volume::entity::{
    MarketSession, Observations, PaceReport, Projection, ProjectionRequest, SlotGuide, SlotTime,
    TimeSlot,
};
use voltrack_core::volume::port::VolumeProjector;

use crate::distribution::fraction_as_of;
use crate::granular::project_granular;
use crate::grid::generate_time_slots;
use crate::guide::slot_guide;
use crate::pace::assess_pace;
use crate::scalar::project_scalar;
use crate::session::classify;

/// # Summary
/// `VolumeProjector` 的默认实现。
///
/// # Invariants
/// - 时间网格在构造时生成一次，之后只读。
/// - 每次调用都从零重新计算，不保留任何中间状态。
pub struct ProjectionService {
    // 交易日时间网格 (08:00 - 16:55)
    grid: Vec<TimeSlot>,
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectionService {
    pub fn new() -> Self {
        Self {
            grid: generate_time_slots(),
        }
    }
}

impl VolumeProjector for ProjectionService {
    fn time_grid(&self) -> &[TimeSlot] {
        &self.grid
    }

    fn classify(&self, now: NaiveTime) -> MarketSession {
        classify(now)
    }

    fn project(&self, request: &ProjectionRequest) -> Projection {
        let now = SlotTime::from_naive_time(request.now);
        let projection = match &request.observations {
            Observations::Scalar { current_volume } => {
                project_scalar(request.average_daily_volume, *current_volume, now)
            }
            Observations::Granular {
                overrides,
                manual_daily_volume,
            } => project_granular(
                &self.grid,
                request.average_daily_volume,
                overrides,
                *manual_daily_volume,
            ),
        };
        debug!(
            "Projection computed: mode={:?}, now={}, points={}, projected={}",
            projection.mode,
            now,
            projection.points.len(),
            projection.summary.is_some()
        );
        projection
    }

    fn expected_volume_now(&self, average_daily_volume: f64, now: NaiveTime) -> f64 {
        average_daily_volume * fraction_as_of(SlotTime::from_naive_time(now))
    }

    fn pace(
        &self,
        average_daily_volume: f64,
        current_volume: f64,
        now: NaiveTime,
    ) -> Option<PaceReport> {
        assess_pace(current_volume, self.expected_volume_now(average_daily_volume, now))
    }

    fn slot_guide(&self, average_daily_volume: f64) -> Vec<SlotGuide> {
        slot_guide(&self.grid, average_daily_volume)
    }
}
