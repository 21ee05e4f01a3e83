use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::volume::error::VolumeError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// # Summary
/// 当日时刻，精确到分钟，对外以 `"HH:MM"` 文本表示。
///
/// # Invariants
/// - 内部值为自零点起的分钟数，范围 `[0, 1440)`。
/// - 排序即时间先后顺序，可直接作为有序映射的键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(u32);

impl SlotTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// 截断秒与纳秒，只保留时与分
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or_default()
    }

    /// 自零点起的分钟数
    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// 向前回退若干分钟，跨越零点时返回 None
    pub fn checked_sub_minutes(self, minutes: u32) -> Option<Self> {
        self.0.checked_sub(minutes).map(Self)
    }
}

impl std::fmt::Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VolumeError::InvalidSlotLabel(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = VolumeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// # Summary
/// 交易日时间网格中的一个 5 分钟时段。
///
/// # Invariants
/// - `is_market_hours == !is_pre_market && !is_after_market`。
/// - 三个标志中至多一个时段标志为真。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: SlotTime,
    pub is_pre_market: bool,
    pub is_after_market: bool,
    pub is_market_hours: bool,
}

/// # Summary
/// 成交量分布曲线上的锚点：截至 `time` 的累计成交量占全天成交量的比例。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionPoint {
    pub time: SlotTime,
    // 累计占比，取值 [0, 1]
    pub cumulative_fraction: f64,
}

/// # Summary
/// 交易时段状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketStatus {
    // 盘前 [00:00, 09:30)
    PreMarket,
    // 常规交易 [09:30, 16:00)
    Open,
    // 盘后 [16:00, 24:00)
    AfterHours,
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketStatus::PreMarket => write!(f, "pre-market"),
            MarketStatus::Open => write!(f, "open"),
            MarketStatus::AfterHours => write!(f, "after-hours"),
        }
    }
}

/// # Summary
/// 面向展示的时段标签，盘前从 04:00 才开始计，04:00 之前归入盘后。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionLabel {
    PreMarket,
    MarketOpen,
    AfterMarket,
}

impl std::fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionLabel::PreMarket => write!(f, "PRE-MARKET"),
            SessionLabel::MarketOpen => write!(f, "MARKET OPEN"),
            SessionLabel::AfterMarket => write!(f, "AFTERMARKET"),
        }
    }
}

/// # Summary
/// 某一时刻的交易时段判定结果。
///
/// # Invariants
/// - `is_market_open`、`is_pre_market`、`is_after_market` 恰有一个为真，且与 `status` 一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSession {
    pub is_market_open: bool,
    pub is_pre_market: bool,
    pub is_after_market: bool,
    pub status: MarketStatus,
    pub label: SessionLabel,
}

/// # Summary
/// 推算输入中的观测数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Observations {
    /// 单值模式：截至当前时刻的累计成交量
    Scalar { current_volume: f64 },
    /// 分时模式：各 5 分钟时段的单段成交量 (非累计)，以及可选的全天目标量
    Granular {
        overrides: BTreeMap<SlotTime, f64>,
        manual_daily_volume: Option<f64>,
    },
}

/// # Summary
/// 推算请求，推算引擎是该结构到 `Projection` 的纯函数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    // 50 日平均日成交量
    pub average_daily_volume: f64,
    // 交易所本地的当前时刻
    pub now: NaiveTime,
    pub observations: Observations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    Scalar,
    Granular,
}

/// # Summary
/// 图表输出点。`None` 表示该点无数据 (折线断开)，绝不等同于 0。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: SlotTime,
    // 期望累计成交量 (已取整)
    pub expected_cumulative: Option<f64>,
    // 实际/推算累计成交量 (已取整)
    pub actual_cumulative: Option<f64>,
    pub is_pre_market: bool,
    pub is_after_market: bool,
}

/// # Summary
/// 推算结果摘要。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    // 推算的全天成交量
    pub projected_daily_volume: f64,
    // 相对均量的节奏比例，均量为 0 时无意义
    pub volume_ratio: Option<f64>,
    // 分时模式下最后一个有观测的时段
    pub last_observed: Option<SlotTime>,
    // 是否采用了人工指定的全天目标量
    pub manual_target: bool,
}

/// # Summary
/// 一次完整推算的输出。
///
/// # Invariants
/// - `points` 按时间升序排列。
/// - 无法推算时 `summary` 为 None，对应的 `actual_cumulative` 亦为 None。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub points: Vec<ChartPoint>,
    pub summary: Option<ProjectionSummary>,
}

/// # Summary
/// 成交量节奏状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    // 尚未输入当前成交量
    AwaitingInput,
    // 高于期望 20% 以上
    Above,
    // 低于期望 20% 以上
    Below,
    // 正常区间
    Normal,
}

/// # Summary
/// 当前成交量相对期望成交量的节奏报告。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceReport {
    pub status: PaceStatus,
    pub current_volume: f64,
    pub expected_volume: f64,
    // (当前 - 期望) / 期望 * 100
    pub diff_pct: Option<f64>,
    // 当前 / 期望 * 100
    pub percent_of_expected: Option<f64>,
}

impl PaceReport {
    /// 面向用户的一行状态描述
    pub fn description(&self) -> String {
        match (self.status, self.diff_pct) {
            (PaceStatus::AwaitingInput, _) | (_, None) => "Enter current volume".to_string(),
            (PaceStatus::Above, Some(diff)) => format!("+{:.1}% above expected", diff),
            (PaceStatus::Below, Some(diff)) => format!("{:.1}% below expected", diff),
            (PaceStatus::Normal, Some(diff)) => {
                let sign = if diff > 0.0 { "+" } else { "" };
                format!("{}{:.1}% (normal)", sign, diff)
            }
        }
    }
}

/// # Summary
/// 单个时段的输入指引，用作分时输入框的占位提示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotGuide {
    pub slot: TimeSlot,
    // 该时段的期望单段成交量
    pub expected_individual: Option<f64>,
    // 截至该时段的期望累计成交量 (仅常规交易时段)
    pub expected_cumulative: Option<f64>,
}
