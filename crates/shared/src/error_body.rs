//! # エラーレスポンスボディ
//!
//! 全エンドポイント共通のエラーレスポンス構造体 `{ "error": "..." }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorBody` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - よく使うエラー種別は便利コンストラクタで提供し、メッセージの重複を排除
//! - クライアントに返す文言はここで固定し、内部詳細はサーバーログにのみ残す

use serde::{Deserialize, Serialize};

/// エラーレスポンスボディ
///
/// すべてのエラーレスポンスは `{ "error": "..." }` 形式で返す。
/// 500 系のメッセージは意図的に汎用的な文言とし、スタックトレースや
/// 内部識別子をクライアントに漏らさない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
   pub error: String,
}

impl ErrorBody {
   /// 汎用コンストラクタ
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error: error.into(),
      }
   }

   /// 500 Internal Server Error（汎用メッセージ）
   pub fn internal_error() -> Self {
      Self::new("Internal Server Error")
   }

   /// 500: 永続化ハンドルが未初期化
   pub fn unavailable() -> Self {
      Self::new("Database connection not established")
   }

   /// 404: 削除対象のタスクが存在しない
   pub fn task_not_found() -> Self {
      Self::new("Task not found")
   }

   /// 400: 必須フィールドの欠落
   pub fn missing_fields() -> Self {
      Self::new("Title and Description are required.")
   }
}
