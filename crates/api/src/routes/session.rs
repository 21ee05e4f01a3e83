//! # 交易时段与节奏路由控制器

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::IntoParams;

use voltrack_core::common::Stock;
use voltrack_core::common::magnitude::parse_volume;
use voltrack_core::volume::entity::SlotTime;

use crate::error::ApiError;
use crate::routes::{parse_average, resolve_now};
use crate::server::AppState;
use crate::types::{ApiErrorResponse, ApiResponse, PaceResponse, SessionResponse};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// 交易所本地时刻 "HH:MM"，缺省时取服务器时钟
    pub now: Option<String>,
}

/// 查询当前交易时段
///
/// 返回交易所本地时刻及其所属的盘前/盘中/盘后时段与展示标签。
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "时段 (Session)",
    params(SessionQuery),
    responses(
        (status = 200, description = "查询成功", body = ApiResponse<SessionResponse>),
        (status = 400, description = "时刻格式错误", body = ApiErrorResponse)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let now = resolve_now(&state, query.now.as_deref())?;
    let session = state.projector.classify(now);
    Ok(Json(ApiResponse::ok(SessionResponse::new(
        SlotTime::from_naive_time(now),
        session,
    ))))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaceQuery {
    /// 股票代码
    pub ticker: Option<String>,
    /// 50 日均量，缺省时使用配置中的默认均量
    pub average_daily_volume: Option<String>,
    /// 截至当前的累计成交量
    pub current_volume: Option<String>,
    /// 交易所本地时刻 "HH:MM"
    pub now: Option<String>,
}

/// 评估成交量节奏
///
/// 将当前累计成交量与截至此刻的期望值比较，偏离超过 ±20% 视为放量或缩量。
#[utoipa::path(
    get,
    path = "/api/v1/pace",
    tag = "时段 (Session)",
    params(PaceQuery),
    responses(
        (status = 200, description = "评估成功", body = ApiResponse<PaceResponse>),
        (status = 400, description = "时刻格式错误或期望成交量不可用", body = ApiErrorResponse)
    )
)]
pub async fn get_pace(
    State(state): State<AppState>,
    Query(query): Query<PaceQuery>,
) -> Result<Json<ApiResponse<PaceResponse>>, ApiError> {
    let now = resolve_now(&state, query.now.as_deref())?;
    let average = query
        .average_daily_volume
        .as_deref()
        .unwrap_or(&state.app_config.market.default_average_daily_volume);
    let average_daily_volume = parse_average(average);
    let current_volume = query
        .current_volume
        .as_deref()
        .and_then(parse_volume)
        .unwrap_or(0.0);

    let report = state
        .projector
        .pace(average_daily_volume, current_volume, now)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "{} 时刻的期望成交量不可用",
                SlotTime::from_naive_time(now)
            ))
        })?;

    let ticker = Stock::new(query.ticker.as_deref().unwrap_or_default()).symbol;
    Ok(Json(ApiResponse::ok(PaceResponse::new(ticker, &report))))
}
