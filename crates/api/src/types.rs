//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use voltrack_core::common::magnitude::format_volume;
use voltrack_core::volume::entity::{
    ChartPoint, MarketSession, PaceReport, ProjectionSummary, SlotGuide, SlotTime,
};

// ============================================================
//  推算相关 DTO
// ============================================================

/// 单值模式推算请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScalarProjectionRequest {
    /// 股票代码
    #[schema(example = "AAPL")]
    pub ticker: String,
    /// 50 日均量 (支持 k/m/b 后缀与千分位)
    #[schema(example = "50m")]
    pub average_daily_volume: String,
    /// 截至当前的累计成交量
    #[schema(example = "19.5m")]
    pub current_volume: String,
    /// 交易所本地时刻 "HH:MM"，缺省时取服务器时钟
    #[schema(example = "12:00")]
    pub now: Option<String>,
}

/// 分时模式推算请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GranularProjectionRequest {
    /// 股票代码
    #[schema(example = "AAPL")]
    pub ticker: String,
    /// 50 日均量
    #[schema(example = "50m")]
    pub average_daily_volume: String,
    /// 各 5 分钟时段的单段成交量 (非累计)，键为 "HH:MM"
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
    /// 人工指定的全天成交量目标
    #[schema(example = "65m")]
    pub manual_daily_volume: Option<String>,
    /// 交易所本地时刻 "HH:MM"，缺省时取服务器时钟
    #[schema(example = "12:00")]
    pub now: Option<String>,
}

/// 图表点 DTO，`null` 表示该点无数据
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartPointResponse {
    /// 时刻 "HH:MM"
    #[schema(example = "10:05")]
    pub time: String,
    /// 期望累计成交量
    #[schema(example = 10_500_000.0)]
    pub expected_cumulative: Option<f64>,
    /// 实际/推算累计成交量
    #[schema(example = 3_012_500.0)]
    pub actual_cumulative: Option<f64>,
    pub is_pre_market: bool,
    pub is_after_market: bool,
}

/// 推算摘要 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectionSummaryResponse {
    /// 推算的全天成交量
    #[schema(example = 15_000_000.0)]
    pub projected_daily_volume: f64,
    /// 格式化后的全天成交量
    #[schema(example = "15.0M")]
    pub projected_daily_volume_display: String,
    /// 相对均量的节奏比例
    #[schema(example = 0.3)]
    pub volume_ratio: Option<f64>,
    /// 最后一个有观测的时段
    #[schema(example = "10:00")]
    pub last_observed: Option<String>,
    /// 是否采用人工目标量
    pub manual_target: bool,
}

/// 交易时段 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// 交易所本地时刻
    #[schema(example = "12:00")]
    pub time: String,
    pub is_market_open: bool,
    pub is_pre_market: bool,
    pub is_after_market: bool,
    /// 逻辑时段 (pre-market / open / after-hours)
    #[schema(example = "open")]
    pub status: String,
    /// 展示标签
    #[schema(example = "MARKET OPEN")]
    pub label: String,
}

/// 推算结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectionResponse {
    #[schema(example = "AAPL")]
    pub ticker: String,
    /// 推算模式 (scalar / granular)
    #[schema(example = "granular")]
    pub mode: String,
    pub session: SessionResponse,
    /// 截至当前的期望累计成交量
    #[schema(example = 19_500_000.0)]
    pub expected_now: f64,
    #[schema(example = "19.5M")]
    pub expected_now_display: String,
    pub points: Vec<ChartPointResponse>,
    /// 无法推算时为 null
    pub summary: Option<ProjectionSummaryResponse>,
}

// ============================================================
//  输入指引与节奏 DTO
// ============================================================

/// 时段输入指引 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlotGuideResponse {
    #[schema(example = "09:30")]
    pub time: String,
    pub is_pre_market: bool,
    pub is_after_market: bool,
    pub is_market_hours: bool,
    /// 期望单段成交量
    #[schema(example = 6_000_000.0)]
    pub expected_individual: Option<f64>,
    /// 输入框占位文本
    #[schema(example = "6.0M")]
    pub placeholder: String,
    /// 期望累计成交量
    pub expected_cumulative: Option<f64>,
}

/// 节奏报告 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaceResponse {
    #[schema(example = "AAPL")]
    pub ticker: String,
    /// awaiting_input / above / below / normal
    #[schema(example = "above")]
    pub status: String,
    #[schema(example = "+33.3% above expected")]
    pub description: String,
    pub current_volume: f64,
    pub expected_volume: f64,
    #[schema(example = "19.5M")]
    pub expected_volume_display: String,
    pub diff_pct: Option<f64>,
    pub percent_of_expected: Option<f64>,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 → DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<&ChartPoint> for ChartPointResponse {
    fn from(p: &ChartPoint) -> Self {
        Self {
            time: p.time.to_string(),
            expected_cumulative: p.expected_cumulative,
            actual_cumulative: p.actual_cumulative,
            is_pre_market: p.is_pre_market,
            is_after_market: p.is_after_market,
        }
    }
}

impl From<ProjectionSummary> for ProjectionSummaryResponse {
    fn from(s: ProjectionSummary) -> Self {
        Self {
            projected_daily_volume: s.projected_daily_volume,
            projected_daily_volume_display: format_volume(Some(s.projected_daily_volume)),
            volume_ratio: s.volume_ratio,
            last_observed: s.last_observed.map(|t| t.to_string()),
            manual_target: s.manual_target,
        }
    }
}

impl SessionResponse {
    pub fn new(time: SlotTime, session: MarketSession) -> Self {
        Self {
            time: time.to_string(),
            is_market_open: session.is_market_open,
            is_pre_market: session.is_pre_market,
            is_after_market: session.is_after_market,
            status: session.status.to_string(),
            label: session.label.to_string(),
        }
    }
}

impl From<&SlotGuide> for SlotGuideResponse {
    fn from(g: &SlotGuide) -> Self {
        Self {
            time: g.slot.time.to_string(),
            is_pre_market: g.slot.is_pre_market,
            is_after_market: g.slot.is_after_market,
            is_market_hours: g.slot.is_market_hours,
            expected_individual: g.expected_individual,
            placeholder: g
                .expected_individual
                .map(|v| format_volume(Some(v)))
                .unwrap_or_default(),
            expected_cumulative: g.expected_cumulative,
        }
    }
}

impl PaceResponse {
    pub fn new(ticker: String, report: &PaceReport) -> Self {
        let status = pace_status_label(report);
        Self {
            ticker,
            status,
            description: report.description(),
            current_volume: report.current_volume,
            expected_volume: report.expected_volume,
            expected_volume_display: format_volume(Some(report.expected_volume)),
            diff_pct: report.diff_pct,
            percent_of_expected: report.percent_of_expected,
        }
    }
}

fn pace_status_label(report: &PaceReport) -> String {
    use voltrack_core::volume::entity::PaceStatus;
    match report.status {
        PaceStatus::AwaitingInput => "awaiting_input",
        PaceStatus::Above => "above",
        PaceStatus::Below => "below",
        PaceStatus::Normal => "normal",
    }
    .to_string()
}
