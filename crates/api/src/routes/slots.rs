//! # 时段输入指引路由控制器

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::routes::parse_average;
use crate::server::AppState;
use crate::types::{ApiResponse, SlotGuideResponse};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotsQuery {
    /// 50 日均量，缺省时使用配置中的默认均量
    pub average_daily_volume: Option<String>,
}

/// 获取时间网格与各时段的期望成交量
///
/// 返回 08:00 至 16:55 的全部 5 分钟时段，期望单段成交量可直接用作分时输入框的占位文本。
#[utoipa::path(
    get,
    path = "/api/v1/slots",
    tag = "推算 (Projection)",
    params(SlotsQuery),
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<Vec<SlotGuideResponse>>)
    )
)]
pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Json<ApiResponse<Vec<SlotGuideResponse>>> {
    let average = query
        .average_daily_volume
        .as_deref()
        .unwrap_or(&state.app_config.market.default_average_daily_volume);
    let guides = state.projector.slot_guide(parse_average(average));
    Json(ApiResponse::ok(guides.iter().map(SlotGuideResponse::from).collect()))
}
