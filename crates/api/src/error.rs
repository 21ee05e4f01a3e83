//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 JSON 响应体。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use voltrack_core::volume::error::VolumeError;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 内部错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "服务器内部错误".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `VolumeError` 转换，输入格式问题一律视为客户端错误
impl From<VolumeError> for ApiError {
    fn from(err: VolumeError) -> Self {
        match &err {
            VolumeError::InvalidSlotLabel(_) | VolumeError::OffGrid(_) => {
                ApiError::BadRequest(err.to_string())
            }
            VolumeError::InvalidTimezone(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_error_status_mapping() {
        let status = |err: VolumeError| ApiError::from(err).into_response().status();
        assert_eq!(status(VolumeError::InvalidSlotLabel("10h".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(VolumeError::OffGrid("10:02".into())), StatusCode::BAD_REQUEST);
        // 时区来自服务端配置，不是请求输入
        assert_eq!(
            status(VolumeError::InvalidTimezone("Mars/Olympus".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
