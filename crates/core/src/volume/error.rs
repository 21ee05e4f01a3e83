use thiserror::Error;

/// # Summary
/// 成交量领域错误枚举。
///
/// # Invariants
/// - 推算计算本身不产生错误（退化输入一律以 `None` 表达），
///   此处仅覆盖输入边界上的格式校验失败。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    // 时间标签不是合法的 "HH:MM"
    #[error("Invalid slot label: {0}")]
    InvalidSlotLabel(String),
    // 时间标签合法，但不在 5 分钟时间网格上
    #[error("Slot {0} is not on the trading day grid")]
    OffGrid(String),
    // 无法识别的 IANA 时区名
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
