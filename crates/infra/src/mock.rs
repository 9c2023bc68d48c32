//! # テスト用モックリポジトリ
//!
//! ハンドラ・ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todoapp-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ID の発番と不正 ID の扱いは MongoDB 実装と同じ規則
//! （ObjectId の 16 進文字列）に揃えてあり、テストが本物と同じ
//! エラー経路を通る。

use std::sync::{
   Arc,
   Mutex,
   atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use todoapp_domain::task::{Task, TaskDraft, TaskId};

use crate::{error::InfraError, repository::TaskRepository};

/// インメモリ実装の TaskRepository
///
/// `Clone` してもストレージは共有される（`Arc<Mutex<_>>`）。
#[derive(Clone, Default)]
pub struct MockTaskRepository {
   tasks: Arc<Mutex<Vec<Task>>>,
   fail:  Arc<AtomicBool>,
}

impl MockTaskRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 以後のすべての操作をデータベースエラーで失敗させる
   ///
   /// 「任意の永続化エラー → 500」の経路をテストするために使用する。
   pub fn set_failing(&self, failing: bool) {
      self.fail.store(failing, Ordering::SeqCst);
   }

   /// 保存されているタスク数を返す
   pub fn task_count(&self) -> usize {
      self.tasks.lock().unwrap().len()
   }

   fn check_failure(&self) -> Result<(), InfraError> {
      if self.fail.load(Ordering::SeqCst) {
         return Err(InfraError::unexpected("モックが失敗モードです"));
      }
      Ok(())
   }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
   async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
      self.check_failure()?;
      Ok(self.tasks.lock().unwrap().clone())
   }

   async fn insert(&self, draft: TaskDraft) -> Result<Task, InfraError> {
      self.check_failure()?;

      let task = Task::from_db(
         TaskId::from_string(ObjectId::new().to_hex()),
         draft.title().to_string(),
         draft.description().to_string(),
      );
      self.tasks.lock().unwrap().push(task.clone());

      Ok(task)
   }

   async fn delete_by_id(&self, id: &TaskId) -> Result<bool, InfraError> {
      self.check_failure()?;

      // MongoDB 実装と同じく、形式不正はデータベース到達前に弾く
      if ObjectId::parse_str(id.as_str()).is_err() {
         return Err(InfraError::invalid_id(id.as_str()));
      }

      let mut tasks = self.tasks.lock().unwrap();
      let before = tasks.len();
      tasks.retain(|task| task.id() != id);

      Ok(tasks.len() < before)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;
   use crate::error::InfraErrorKind;

   #[tokio::test]
   async fn test_insertで発番されたidがfind_allで見える() {
      let repo = MockTaskRepository::new();
      let draft = TaskDraft::new("タイトル", "説明").unwrap();

      let inserted = repo.insert(draft).await.unwrap();
      let all = repo.find_all().await.unwrap();

      assert_eq!(all, vec![inserted]);
   }

   #[tokio::test]
   async fn test_insertごとに異なるidが発番される() {
      let repo = MockTaskRepository::new();

      let a = repo
         .insert(TaskDraft::new("a", "a").unwrap())
         .await
         .unwrap();
      let b = repo
         .insert(TaskDraft::new("b", "b").unwrap())
         .await
         .unwrap();

      assert_ne!(a.id(), b.id());
   }

   #[tokio::test]
   async fn test_delete_by_idは一致した場合のみtrueを返す() {
      let repo = MockTaskRepository::new();
      let task = repo
         .insert(TaskDraft::new("t", "d").unwrap())
         .await
         .unwrap();

      assert!(repo.delete_by_id(task.id()).await.unwrap());
      assert_eq!(repo.task_count(), 0);

      // 既に削除済み → 一致なし
      assert!(!repo.delete_by_id(task.id()).await.unwrap());
   }

   #[tokio::test]
   async fn test_不正な形式のidはinvalid_idエラーになる() {
      let repo = MockTaskRepository::new();
      let id = TaskId::from_string("not-hex".to_string());

      let err = repo.delete_by_id(&id).await.unwrap_err();

      assert!(matches!(err.kind(), InfraErrorKind::InvalidId(_)));
   }

   #[tokio::test]
   async fn test_失敗モードで全操作がエラーになる() {
      let repo = MockTaskRepository::new();
      repo.set_failing(true);

      assert!(repo.find_all().await.is_err());
      assert!(
         repo
            .insert(TaskDraft::new("t", "d").unwrap())
            .await
            .is_err()
      );
   }
}
