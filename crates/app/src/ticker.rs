//! # 交易所时钟心跳
//!
//! 定时读取交易所时钟，记录当前时段与截至此刻的期望成交量。
//! 推算引擎本身无状态，心跳只负责把 "现在" 喂给它。

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use voltrack_core::common::magnitude::{format_volume, parse_volume};
use voltrack_core::common::time::ExchangeClock;
use voltrack_core::volume::entity::{SessionLabel, SlotTime};
use voltrack_core::volume::port::VolumeProjector;

/// 一次心跳的快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSnapshot {
    pub time: SlotTime,
    pub label: SessionLabel,
    pub expected_volume: f64,
}

/// 根据时钟读数生成心跳快照
pub fn snapshot(
    projector: &dyn VolumeProjector,
    clock: &ExchangeClock,
    average_daily_volume: f64,
) -> TickSnapshot {
    let now = clock.time_of_day();
    TickSnapshot {
        time: SlotTime::from_naive_time(now),
        label: projector.classify(now).label,
        expected_volume: projector.expected_volume_now(average_daily_volume, now),
    }
}

/// # Summary
/// 心跳主循环，永不返回，随进程退出而终止。
///
/// # Logic
/// 1. 按 `tick_secs` 间隔触发，首次立即触发。
/// 2. 时段标签变化时以 info 级别记录，其余心跳只记 debug。
pub async fn run(
    projector: Arc<dyn VolumeProjector>,
    clock: Arc<ExchangeClock>,
    tick_secs: u64,
    default_average_daily_volume: String,
) {
    let average = parse_volume(&default_average_daily_volume).unwrap_or(0.0);
    let mut interval = tokio::time::interval(Duration::from_secs(tick_secs.max(1)));
    let mut last_label: Option<SessionLabel> = None;

    loop {
        interval.tick().await;
        let tick = snapshot(projector.as_ref(), &clock, average);

        if last_label != Some(tick.label) {
            info!("[{}] 进入 {} 时段", tick.time, tick.label);
            last_label = Some(tick.label);
        }
        debug!(
            "[{}] {} 期望累计成交量 {}",
            tick.time,
            tick.label,
            format_volume(Some(tick.expected_volume))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use voltrack_core::common::time::FakeClockProvider;
    use voltrack_projection::service::ProjectionService;

    #[test]
    fn test_snapshot_follows_exchange_clock() {
        // 2026-03-02 为美东标准时间，UTC-5
        let provider = Arc::new(FakeClockProvider::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 17, 0, 0).unwrap(),
        ));
        let clock = ExchangeClock::from_timezone_name(provider.clone(), "America/New_York").unwrap();
        let service = ProjectionService::new();

        let tick = snapshot(&service, &clock, 50_000_000.0);
        assert_eq!(tick.time.to_string(), "12:00");
        assert_eq!(tick.label, SessionLabel::MarketOpen);
        assert_eq!(tick.expected_volume, 19_500_000.0);

        provider.set_time(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        let tick = snapshot(&service, &clock, 50_000_000.0);
        assert_eq!(tick.time.to_string(), "04:00");
        assert_eq!(tick.label, SessionLabel::PreMarket);
    }
}
