//! # 成交量推算路由控制器
//!
//! 实现 `/api/v1/projection` 路径下的 REST 接口。
//! 每次请求都基于完整输入重新推算，不保留任何会话状态。

use axum::Json;
use axum::extract::State;
use chrono::NaiveTime;
use tracing::info;

use voltrack_core::common::Stock;
use voltrack_core::common::magnitude::{format_volume, parse_volume};
use voltrack_core::volume::entity::{
    Observations, Projection, ProjectionMode, ProjectionRequest, SlotTime,
};

use crate::error::ApiError;
use crate::routes::{parse_average, parse_overrides, resolve_now};
use crate::server::AppState;
use crate::types::{
    ApiErrorResponse, ApiResponse, ChartPointResponse, GranularProjectionRequest,
    ProjectionResponse, ProjectionSummaryResponse, ScalarProjectionRequest, SessionResponse,
};

/// 单值模式推算
///
/// 以截至当前的累计成交量按期望占比整体缩放全天曲线。
#[utoipa::path(
    post,
    path = "/api/v1/projection/scalar",
    tag = "推算 (Projection)",
    request_body = ScalarProjectionRequest,
    responses(
        (status = 200, description = "推算成功", body = ApiResponse<ProjectionResponse>),
        (status = 400, description = "时刻格式错误", body = ApiErrorResponse)
    )
)]
pub async fn project_scalar(
    State(state): State<AppState>,
    Json(req): Json<ScalarProjectionRequest>,
) -> Result<Json<ApiResponse<ProjectionResponse>>, ApiError> {
    let now = resolve_now(&state, req.now.as_deref())?;
    let average_daily_volume = parse_average(&req.average_daily_volume);
    let current_volume = parse_volume(&req.current_volume).unwrap_or(0.0);

    let request = ProjectionRequest {
        average_daily_volume,
        now,
        observations: Observations::Scalar { current_volume },
    };
    let projection = state.projector.project(&request);

    info!(
        "单值推算 {} @ {}: 当前 {}",
        Stock::new(&req.ticker),
        SlotTime::from_naive_time(now),
        format_volume(Some(current_volume))
    );
    Ok(Json(ApiResponse::ok(build_response(
        &state,
        &req.ticker,
        average_daily_volume,
        now,
        projection,
    ))))
}

/// 分时模式推算
///
/// 以各 5 分钟时段的单段成交量重建累计曲线，并平滑过渡到全天推算值。
/// 时段键不在时间网格上时整个请求被拒绝。
#[utoipa::path(
    post,
    path = "/api/v1/projection/granular",
    tag = "推算 (Projection)",
    request_body = GranularProjectionRequest,
    responses(
        (status = 200, description = "推算成功", body = ApiResponse<ProjectionResponse>),
        (status = 400, description = "时刻格式错误或时段不在网格上", body = ApiErrorResponse)
    )
)]
pub async fn project_granular(
    State(state): State<AppState>,
    Json(req): Json<GranularProjectionRequest>,
) -> Result<Json<ApiResponse<ProjectionResponse>>, ApiError> {
    let now = resolve_now(&state, req.now.as_deref())?;
    let average_daily_volume = parse_average(&req.average_daily_volume);
    let overrides = parse_overrides(&state, &req.overrides)?;
    let manual_daily_volume = req.manual_daily_volume.as_deref().and_then(parse_volume);

    info!(
        "分时推算 {}: {} 个时段输入, 人工目标 {}",
        Stock::new(&req.ticker),
        overrides.len(),
        format_volume(manual_daily_volume)
    );

    let request = ProjectionRequest {
        average_daily_volume,
        now,
        observations: Observations::Granular {
            overrides,
            manual_daily_volume,
        },
    };
    let projection = state.projector.project(&request);

    Ok(Json(ApiResponse::ok(build_response(
        &state,
        &req.ticker,
        average_daily_volume,
        now,
        projection,
    ))))
}

fn build_response(
    state: &AppState,
    ticker: &str,
    average_daily_volume: f64,
    now: NaiveTime,
    projection: Projection,
) -> ProjectionResponse {
    let expected_now = state.projector.expected_volume_now(average_daily_volume, now);
    let mode = match projection.mode {
        ProjectionMode::Scalar => "scalar",
        ProjectionMode::Granular => "granular",
    };

    ProjectionResponse {
        ticker: Stock::new(ticker).symbol,
        mode: mode.to_string(),
        session: SessionResponse::new(
            SlotTime::from_naive_time(now),
            state.projector.classify(now),
        ),
        expected_now,
        expected_now_display: format_volume(Some(expected_now)),
        points: projection.points.iter().map(ChartPointResponse::from).collect(),
        summary: projection.summary.map(ProjectionSummaryResponse::from),
    }
}
