use voltrack_core::volume::entity::{PaceReport, PaceStatus};

/// 偏离期望超过该百分比即视为异常放量/缩量
pub const PACE_BAND_PCT: f64 = 20.0;

/// # Summary
/// 评估当前累计成交量相对期望值的节奏。
///
/// # Logic
/// 1. 当前成交量为 0 时提示等待输入。
/// 2. 期望值不大于 0 时无法比较，返回 None。
/// 3. 偏离 = `(当前 - 期望) / 期望 * 100`，超过 ±20% 分别为放量/缩量，否则为正常。
pub fn assess_pace(current_volume: f64, expected_volume: f64) -> Option<PaceReport> {
    if current_volume <= 0.0 {
        return Some(PaceReport {
            status: PaceStatus::AwaitingInput,
            current_volume,
            expected_volume,
            diff_pct: None,
            percent_of_expected: None,
        });
    }
    if expected_volume <= 0.0 {
        return None;
    }

    let diff_pct = (current_volume - expected_volume) / expected_volume * 100.0;
    let status = if diff_pct > PACE_BAND_PCT {
        PaceStatus::Above
    } else if diff_pct < -PACE_BAND_PCT {
        PaceStatus::Below
    } else {
        PaceStatus::Normal
    };

    Some(PaceReport {
        status,
        current_volume,
        expected_volume,
        diff_pct: Some(diff_pct),
        percent_of_expected: Some(current_volume / expected_volume * 100.0),
    })
}
