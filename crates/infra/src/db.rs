//! # MongoDB 接続管理
//!
//! クライアントの生成とコレクションの確保を行う。
//!
//! ## 設計方針
//!
//! - **起動時に一度だけ初期化**: クライアントはプロセス全体で共有し、
//!   内部のコネクションプールが並行リクエストを処理する
//! - **コレクションの事前確保**: 起動時に存在確認してから作成することで、
//!   重複作成エラーを避ける（冪等）
//! - **実 I/O による疎通確認**: `mongodb::Client` の生成は遅延接続のため、
//!   コレクション一覧の取得で実際の接続を検証する
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoapp_infra::db;
//!
//! async fn setup() -> Result<(), todoapp_infra::InfraError> {
//!     let client = db::connect("mongodb://127.0.0.1:27017").await?;
//!     let collection = db::ensure_collection(&client, "to-do-appdb", "tasks").await?;
//!     Ok(())
//! }
//! ```

use mongodb::{Client, Collection};

use crate::{error::InfraError, repository::task_repository::TaskDocument};

/// MongoDB クライアントを生成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したクライアントを
/// アプリケーション全体で共有する。この時点では接続は確立されない
/// （ドライバは遅延接続する）。疎通確認は [`ensure_collection`] が行う。
pub async fn connect(url: &str) -> Result<Client, InfraError> {
   let client = Client::with_uri_str(url).await?;
   Ok(client)
}

/// 対象コレクションを確保し、コレクションハンドルを返す
///
/// コレクションが存在しない場合は作成する。存在確認を先に行うため、
/// 再起動しても重複作成エラーにならない（冪等）。
///
/// コレクション一覧の取得が実際のサーバー通信を伴うため、
/// エンドポイントに到達できない場合はここでエラーになる。
pub async fn ensure_collection(
   client: &Client,
   database: &str,
   collection: &str,
) -> Result<Collection<TaskDocument>, InfraError> {
   let db = client.database(database);

   let names = db.list_collection_names().await?;
   if names.iter().any(|name| name == collection) {
      tracing::info!(collection, "コレクションは既に存在します");
   } else {
      db.create_collection(collection).await?;
      tracing::info!(collection, "コレクションを作成しました");
   }

   Ok(db.collection::<TaskDocument>(collection))
}
