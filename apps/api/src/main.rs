//! # TodoApp API サーバー
//!
//! タスクの一覧・作成・削除を提供する HTTP API サーバー。
//!
//! ## 役割
//!
//! - **HTTP API**: `/api/todoapp` 配下のタスクエンドポイント
//! - **データ永続化**: MongoDB へのタスク保存
//!
//! ## 起動シーケンス
//!
//! 1. 環境変数から設定を読み込む
//! 2. 永続化ハンドルを初期化（接続 + コレクション確保）。
//!    失敗してもサーバーは起動し、データ操作は 500 を返す
//! 3. リクエストの受付を開始
//!
//! ## シャットダウンシーケンス
//!
//! SIGINT / SIGTERM 受信後:
//!
//! 1. 新規接続の受付を停止
//! 2. 処理中のリクエストの完了を待つ（明示的なドレイン）
//! 3. MongoDB クライアントを閉じて終了
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODOAPP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODOAPP_PORT` | No | ポート番号（デフォルト: `4000`） |
//! | `MONGODB_URL` | No | MongoDB 接続 URL（デフォルト: `mongodb://127.0.0.1:27017`） |
//! | `MONGODB_DATABASE` | No | データベース名（デフォルト: `to-do-appdb`） |
//! | `MONGODB_COLLECTION` | No | コレクション名（デフォルト: `tasks`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todoapp-api
//!
//! # 本番環境
//! TODOAPP_PORT=4000 MONGODB_URL=mongodb://... cargo run -p todoapp-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use axum::{
   Router,
   routing::{delete, get, post},
};
use mongodb::Client;
use todoapp_api::{
   config::{ApiConfig, MongoConfig},
   handler::{TaskState, create_task, delete_task, health_check, list_tasks},
   usecase::TaskUseCaseImpl,
};
use todoapp_infra::{InfraError, db, repository::MongoTaskRepository};
use todoapp_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   init_tracing(LogFormat::from_env());

   // 設定読み込み
   let config = ApiConfig::from_env()?;

   tracing::info!(
      "API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // 永続化ハンドルを初期化。失敗してもサーバーは起動し続け、
   // データ操作は「未初期化」の 500 を返す（再接続は行わない）
   let (client, repository) = match initialize_database(&config.mongodb).await {
      Ok((client, repository)) => (Some(client), Some(repository)),
      Err(e) => {
         tracing::error!(error = %e, "データベース接続に失敗しました");
         (None, None)
      }
   };

   let state = Arc::new(TaskState {
      usecase: TaskUseCaseImpl::new(repository),
   });

   // ルーター構築
   let app = Router::new()
      .route("/health", get(health_check))
      .nest(
         "/api/todoapp",
         Router::new()
            .route("/gettasks", get(list_tasks::<MongoTaskRepository>))
            .route("/addtasks", post(create_task::<MongoTaskRepository>))
            .route(
               "/deletetasks/{id}",
               delete(delete_task::<MongoTaskRepository>),
            )
            .with_state(state),
      )
      .layer(TraceLayer::new_for_http())
      .layer(CorsLayer::permissive());

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("バインドアドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("API サーバーが起動しました: {}", addr);

   // Graceful shutdown: serve は処理中のリクエストが完了してから返る
   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   // ドレイン完了後に永続化ハンドルを閉じる
   if let Some(client) = client {
      client.shutdown().await;
      tracing::info!("データベース接続を閉じました");
   }
   tracing::info!("API サーバーを停止しました");

   Ok(())
}

/// 永続化ハンドルを初期化する
///
/// クライアントを生成し、対象コレクションを確保（存在しなければ作成）する。
/// クライアントはシャットダウン時のクローズ用に呼び出し元へ返す。
async fn initialize_database(
   config: &MongoConfig,
) -> Result<(Client, MongoTaskRepository), InfraError> {
   let client = db::connect(&config.url).await?;
   let collection = db::ensure_collection(&client, &config.database, &config.collection).await?;
   tracing::info!(
      database = %config.database,
      collection = %config.collection,
      "データベースに接続しました"
   );

   Ok((client, MongoTaskRepository::new(collection)))
}

/// 終了シグナル（SIGINT / SIGTERM）を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      tokio::signal::ctrl_c()
         .await
         .expect("SIGINT ハンドラの登録に失敗しました");
   };

   #[cfg(unix)]
   let terminate = async {
      tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
         .expect("SIGTERM ハンドラの登録に失敗しました")
         .recv()
         .await;
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
   }

   tracing::info!("終了シグナルを受信しました。シャットダウンします...");
}
