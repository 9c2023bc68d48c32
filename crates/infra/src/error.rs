//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: mongodb::error::Error をラップ
//! - **クライアント起因の分離**: 不正な ID 形式（`InvalidId`）を接続エラーと
//!   別バリアントにし、API 層が 400 / 500 を明示的に選べるようにする
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, InvalidId 等）

use std::fmt;

use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From<mongodb::error::Error>` の変換や convenience constructor でエラーを
/// 生成すると、その時点のスパン情報が自動的にキャプチャされる。
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
///
/// API 層でこのエラー種別に応じて適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// データベースエラー
   ///
   /// 接続失敗、クエリ実行失敗など。API 層では 500 に変換する。
   #[error("データベースエラー: {0}")]
   Database(#[source] mongodb::error::Error),

   /// 不正なタスク ID
   ///
   /// パス中の ID が ObjectId として解釈できない場合。原因はクライアント
   /// 入力にあるため、API 層では 400 に変換する。
   #[error("不正なタスク ID: {0}")]
   InvalidId(String),

   /// 予期しないエラー
   ///
   /// 上記に分類できない予期しないエラー（挿入結果に ID が無い等）。
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
   /// エラー種別を取得する
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   // ===== Convenience constructors =====

   /// 不正なタスク ID エラーを生成する
   pub fn invalid_id(id: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::InvalidId(id.into()),
         span_trace: SpanTrace::capture(),
      }
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::Unexpected(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }
}

// ===== トレイト実装 =====

impl fmt::Display for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}", self.kind)
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<mongodb::error::Error> for InfraError {
   fn from(source: mongodb::error::Error) -> Self {
      Self {
         kind:       InfraErrorKind::Database(source),
         span_trace: SpanTrace::capture(),
      }
   }
}

#[cfg(test)]
mod tests {
   use tracing_subscriber::layer::SubscriberExt as _;

   use super::*;

   /// テスト用に ErrorLayer 付き subscriber を設定する
   fn with_error_layer(f: impl FnOnce()) {
      let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
      let _guard = tracing::subscriber::set_default(subscriber);
      f();
   }

   // ===== From 実装のテスト =====

   #[test]
   fn test_from_mongodb_errorでspan_traceがキャプチャされる() {
      with_error_layer(|| {
         let span = tracing::info_span!("test_repo", collection = "tasks");
         let _enter = span.enter();

         let mongo_err = mongodb::error::Error::custom("接続失敗");
         let err: InfraError = mongo_err.into();

         assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
         let trace_str = format!("{}", err.span_trace());
         assert!(
            trace_str.contains("test_repo"),
            "SpanTrace がスパン名を含むこと: {trace_str}",
         );
      });
   }

   // ===== Convenience constructor のテスト =====

   #[test]
   fn test_invalid_idでspan_traceがキャプチャされる() {
      with_error_layer(|| {
         let span = tracing::info_span!("test_delete");
         let _enter = span.enter();

         let err = InfraError::invalid_id("not-an-object-id");

         assert!(matches!(
            err.kind(),
            InfraErrorKind::InvalidId(id) if id == "not-an-object-id"
         ));
         let trace_str = format!("{}", err.span_trace());
         assert!(trace_str.contains("test_delete"));
      });
   }

   #[test]
   fn test_unexpectedでメッセージを保持する() {
      with_error_layer(|| {
         let err = InfraError::unexpected("挿入結果に ID が無い");
         assert!(matches!(
            err.kind(),
            InfraErrorKind::Unexpected(msg) if msg == "挿入結果に ID が無い"
         ));
      });
   }

   // ===== Display / source のテスト =====

   #[test]
   fn test_displayがinfra_error_kindのメッセージを出力する() {
      let err = InfraError::invalid_id("xyz");
      assert_eq!(format!("{err}"), "不正なタスク ID: xyz");
   }

   #[test]
   fn test_sourceがinfra_error_kindに委譲する() {
      use std::error::Error;

      let mongo_err = mongodb::error::Error::custom("boom");
      let err: InfraError = mongo_err.into();

      // Database バリアントは mongodb::error::Error を source として持つ
      assert!(err.source().is_some());
   }
}
