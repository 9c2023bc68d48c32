//! # タスクユースケース
//!
//! タスクの一覧・作成・削除のアプリケーションロジックを実装する。
//!
//! 永続化ハンドル（リポジトリ）の「未初期化」状態をここで一元的に
//! 扱う: 起動時の接続失敗時は `new(None)` で構築され、すべての
//! データ操作が [`ApiError::Unavailable`] を返す。

use todoapp_domain::task::{Task, TaskDraft, TaskId};
use todoapp_infra::repository::TaskRepository;

use crate::error::ApiError;

/// タスクユースケース実装
///
/// R: TaskRepository
pub struct TaskUseCaseImpl<R> {
   repository: Option<R>,
}

impl<R> TaskUseCaseImpl<R>
where
   R: TaskRepository,
{
   /// 新しいユースケースを作成する
   ///
   /// `repository` が `None` の場合、すべての操作は
   /// [`ApiError::Unavailable`]（HTTP 500）を返す。
   pub fn new(repository: Option<R>) -> Self {
      Self { repository }
   }

   /// 永続化ハンドルが初期化済みかどうか
   pub fn is_ready(&self) -> bool {
      self.repository.is_some()
   }

   fn repository(&self) -> Result<&R, ApiError> {
      self.repository.as_ref().ok_or(ApiError::Unavailable)
   }

   /// タスクを全件取得する
   pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
      let tasks = self.repository()?.find_all().await?;
      Ok(tasks)
   }

   /// タスクを作成する
   ///
   /// `title` / `description` の両方が存在し非空であることを検証してから
   /// 挿入する。検証に失敗した場合、永続化呼び出しは行わない。
   pub async fn create_task(
      &self,
      title: Option<String>,
      description: Option<String>,
   ) -> Result<Task, ApiError> {
      let repository = self.repository()?;

      let (Some(title), Some(description)) = (title, description) else {
         return Err(ApiError::MissingFields);
      };
      let draft = TaskDraft::new(title, description).map_err(|_| ApiError::MissingFields)?;

      let task = repository.insert(draft).await?;
      tracing::info!(task_id = %task.id(), title = task.title(), "タスクを作成しました");

      Ok(task)
   }

   /// タスクを ID で削除する
   ///
   /// 一致するタスクが存在しない場合は [`ApiError::TaskNotFound`]。
   pub async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
      let deleted = self.repository()?.delete_by_id(id).await?;

      if !deleted {
         return Err(ApiError::TaskNotFound);
      }
      tracing::info!(task_id = %id, "タスクを削除しました");

      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use todoapp_infra::mock::MockTaskRepository;

   use super::*;

   fn ready_usecase() -> TaskUseCaseImpl<MockTaskRepository> {
      TaskUseCaseImpl::new(Some(MockTaskRepository::new()))
   }

   fn unready_usecase() -> TaskUseCaseImpl<MockTaskRepository> {
      TaskUseCaseImpl::new(None)
   }

   // ===== 未初期化ハンドル =====

   #[tokio::test]
   async fn test_未初期化ハンドルでは全操作がunavailableになる() {
      let usecase = unready_usecase();

      assert!(!usecase.is_ready());
      assert!(matches!(
         usecase.list_tasks().await,
         Err(ApiError::Unavailable)
      ));
      assert!(matches!(
         usecase
            .create_task(Some("t".to_string()), Some("d".to_string()))
            .await,
         Err(ApiError::Unavailable)
      ));
      assert!(matches!(
         usecase
            .delete_task(&TaskId::from_string("65b2f0c4a1d2e3f4a5b6c7d8".to_string()))
            .await,
         Err(ApiError::Unavailable)
      ));
   }

   // ===== create_task =====

   #[tokio::test]
   async fn test_作成したタスクが一覧に含まれる() {
      let usecase = ready_usecase();

      let task = usecase
         .create_task(Some("買い物".to_string()), Some("牛乳".to_string()))
         .await
         .unwrap();
      let tasks = usecase.list_tasks().await.unwrap();

      assert_eq!(tasks, vec![task]);
   }

   #[tokio::test]
   async fn test_フィールド欠落では挿入されずmissing_fieldsになる() {
      let usecase = ready_usecase();

      let result = usecase.create_task(None, Some("説明".to_string())).await;

      assert!(matches!(result, Err(ApiError::MissingFields)));
      assert_eq!(usecase.list_tasks().await.unwrap().len(), 0);
   }

   #[tokio::test]
   async fn test_空文字列のフィールドもmissing_fieldsになる() {
      let usecase = ready_usecase();

      let result = usecase
         .create_task(Some(String::new()), Some("説明".to_string()))
         .await;

      assert!(matches!(result, Err(ApiError::MissingFields)));
   }

   // ===== delete_task =====

   #[tokio::test]
   async fn test_存在しないidの削除はtask_not_foundになる() {
      let usecase = ready_usecase();

      let result = usecase
         .delete_task(&TaskId::from_string("65b2f0c4a1d2e3f4a5b6c7d8".to_string()))
         .await;

      assert!(matches!(result, Err(ApiError::TaskNotFound)));
   }

   #[tokio::test]
   async fn test_作成したタスクを削除すると一覧から消える() {
      let usecase = ready_usecase();
      let task = usecase
         .create_task(Some("t".to_string()), Some("d".to_string()))
         .await
         .unwrap();

      usecase.delete_task(task.id()).await.unwrap();

      assert_eq!(usecase.list_tasks().await.unwrap().len(), 0);
   }
}
