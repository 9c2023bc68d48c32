//! # タスク API ハンドラ
//!
//! タスクの一覧・作成・削除エンドポイントを実装する。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 成功 |
//! |---------|------|------|
//! | GET | `/api/todoapp/gettasks` | 200, タスクの JSON 配列 |
//! | POST | `/api/todoapp/addtasks` | 201, 発番済み `id` を含むタスク |
//! | DELETE | `/api/todoapp/deletetasks/{id}` | 200, `{"success": true}` |

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use todoapp_domain::task::{Task, TaskId};
use todoapp_infra::repository::TaskRepository;

use crate::{error::ApiError, extract::JsonOrForm, usecase::TaskUseCaseImpl};

/// タスクハンドラーの State
pub struct TaskState<R> {
   pub usecase: TaskUseCaseImpl<R>,
}

/// タスク DTO
///
/// `id` は永続化層が発番した不透明な識別子の文字列表現。
#[derive(Debug, Serialize)]
pub struct TaskDto {
   pub id:          String,
   pub title:       String,
   pub description: String,
}

impl TaskDto {
   fn from_task(task: &Task) -> Self {
      Self {
         id:          task.id().to_string(),
         title:       task.title().to_string(),
         description: task.description().to_string(),
      }
   }
}

/// タスク作成リクエスト
///
/// フィールドの欠落をデシリアライズエラーではなく 400 の固定メッセージに
/// するため、両フィールドとも `Option` で受けてユースケース層で検証する。
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
   #[serde(default)]
   pub title:       Option<String>,
   #[serde(default)]
   pub description: Option<String>,
}

/// タスク削除レスポンス
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
   pub success: bool,
}

/// タスクを全件取得する
///
/// ## エンドポイント
/// GET /api/todoapp/gettasks
pub async fn list_tasks<R>(State(state): State<Arc<TaskState<R>>>) -> Result<Response, ApiError>
where
   R: TaskRepository,
{
   let tasks = state.usecase.list_tasks().await?;
   let body: Vec<TaskDto> = tasks.iter().map(TaskDto::from_task).collect();

   Ok((StatusCode::OK, Json(body)).into_response())
}

/// タスクを作成する
///
/// ## エンドポイント
/// POST /api/todoapp/addtasks
///
/// ボディは JSON または URL エンコードフォーム。
pub async fn create_task<R>(
   State(state): State<Arc<TaskState<R>>>,
   JsonOrForm(payload): JsonOrForm<CreateTaskRequest>,
) -> Result<Response, ApiError>
where
   R: TaskRepository,
{
   let task = state
      .usecase
      .create_task(payload.title, payload.description)
      .await?;

   Ok((StatusCode::CREATED, Json(TaskDto::from_task(&task))).into_response())
}

/// タスクを ID で削除する
///
/// ## エンドポイント
/// DELETE /api/todoapp/deletetasks/{id}
pub async fn delete_task<R>(
   State(state): State<Arc<TaskState<R>>>,
   Path(id): Path<String>,
) -> Result<Response, ApiError>
where
   R: TaskRepository,
{
   state
      .usecase
      .delete_task(&TaskId::from_string(id))
      .await?;

   Ok((StatusCode::OK, Json(DeleteTaskResponse { success: true })).into_response())
}
