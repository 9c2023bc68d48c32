//! # API エラー定義
//!
//! API サーバー固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | レスポンスボディ |
//! |-----------|----------------|------------------|
//! | `MissingFields` | 400 | `Title and Description are required.` |
//! | `BadRequest` | 400 | リクエスト固有のメッセージ |
//! | `TaskNotFound` | 404 | `Task not found` |
//! | `Unavailable` | 500 | `Database connection not established` |
//! | `Infra`（InvalidId） | 400 | `Invalid task id` |
//! | `Infra`（その他） | 500 | `Internal Server Error` |
//!
//! ## 設計方針
//!
//! - 500 系の詳細はサーバーログ（`tracing::error!`）にのみ残し、
//!   クライアントには汎用メッセージだけを返す
//! - 不正な ID 形式は接続エラーと区別し、クライアント起因として 400 を返す

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todoapp_infra::{InfraError, InfraErrorKind};
use todoapp_shared::ErrorBody;

/// API サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// title / description の欠落または空文字列
   #[error("title と description は必須です")]
   MissingFields,

   /// リクエストボディの解釈失敗など、その他のクライアント起因エラー
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 削除対象のタスクが存在しない
   #[error("タスクが見つかりません")]
   TaskNotFound,

   /// 永続化ハンドルが未初期化（起動時の接続失敗）
   #[error("永続化ハンドルが未初期化です")]
   Unavailable,

   /// インフラ層エラー
   #[error("インフラエラー: {0}")]
   Infra(#[from] InfraError),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let (status, body) = match &self {
         ApiError::MissingFields => (StatusCode::BAD_REQUEST, ErrorBody::missing_fields()),
         ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg.clone())),
         ApiError::TaskNotFound => (StatusCode::NOT_FOUND, ErrorBody::task_not_found()),
         ApiError::Unavailable => {
            tracing::warn!("永続化ハンドルが未初期化のままリクエストを受信しました");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::unavailable())
         }
         ApiError::Infra(e) => match e.kind() {
            InfraErrorKind::InvalidId(id) => {
               tracing::debug!(task_id = %id, "不正な形式のタスク ID");
               (StatusCode::BAD_REQUEST, ErrorBody::new("Invalid task id"))
            }
            _ => {
               tracing::error!(error = %e, span_trace = %e.span_trace(), "インフラエラー");
               (
                  StatusCode::INTERNAL_SERVER_ERROR,
                  ErrorBody::internal_error(),
               )
            }
         },
      };

      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   fn status_of(error: ApiError) -> StatusCode {
      error.into_response().status()
   }

   #[test]
   fn test_missing_fieldsは400になる() {
      assert_eq!(status_of(ApiError::MissingFields), StatusCode::BAD_REQUEST);
   }

   #[test]
   fn test_task_not_foundは404になる() {
      assert_eq!(status_of(ApiError::TaskNotFound), StatusCode::NOT_FOUND);
   }

   #[test]
   fn test_unavailableは500になる() {
      assert_eq!(
         status_of(ApiError::Unavailable),
         StatusCode::INTERNAL_SERVER_ERROR
      );
   }

   #[test]
   fn test_invalid_idのインフラエラーは400になる() {
      let error = ApiError::Infra(InfraError::invalid_id("xyz"));
      assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
   }

   #[test]
   fn test_その他のインフラエラーは500になる() {
      let error = ApiError::Infra(InfraError::unexpected("boom"));
      assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
   }
}
