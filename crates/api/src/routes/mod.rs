//! # 路由控制器
//!
//! 每个子模块对应一组 REST 接口。公共的输入归一化逻辑放在本模块。

pub mod projection;
pub mod session;
pub mod slots;

use std::collections::BTreeMap;

use chrono::NaiveTime;

use voltrack_core::common::magnitude::parse_volume;
use voltrack_core::volume::entity::SlotTime;
use voltrack_core::volume::error::VolumeError;

use crate::error::ApiError;
use crate::server::AppState;

/// # Summary
/// 解析请求中的当前时刻。
///
/// # Logic
/// 1. 显式给出 `"HH:MM"` 时按交易所本地时刻解析。
/// 2. 缺省或为空时读取服务器时钟，换算到交易所时区。
pub(crate) fn resolve_now(state: &AppState, now: Option<&str>) -> Result<NaiveTime, ApiError> {
    match now.map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => Ok(label.parse::<SlotTime>()?.to_naive_time()),
        None => Ok(state.clock.time_of_day()),
    }
}

/// 均量无法识别时按 0 处理，推算结果随之为空
pub(crate) fn parse_average(input: &str) -> f64 {
    parse_volume(input).unwrap_or(0.0)
}

/// # Summary
/// 将文本形式的分时输入转为按时段排序的成交量映射。
///
/// # Logic
/// 1. 键必须是合法的 `"HH:MM"` 且落在时间网格上，否则整个请求无效。
/// 2. 值无法识别的单元格视为未填写，直接忽略。
pub(crate) fn parse_overrides(
    state: &AppState,
    raw: &BTreeMap<String, String>,
) -> Result<BTreeMap<SlotTime, f64>, ApiError> {
    let grid = state.projector.time_grid();
    let mut overrides = BTreeMap::new();
    for (label, value) in raw {
        let slot: SlotTime = label.parse()?;
        if !grid.iter().any(|s| s.time == slot) {
            return Err(VolumeError::OffGrid(label.clone()).into());
        }
        match parse_volume(value) {
            Some(volume) => {
                overrides.insert(slot, volume);
            }
            None => tracing::debug!("忽略无法识别的时段输入 {} = {:?}", label, value),
        }
    }
    Ok(overrides)
}
