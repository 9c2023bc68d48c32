//! # TaskRepository
//!
//! タスクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **トレイトによる抽象化**: ユースケース層はトレイトにのみ依存し、
//!   テストではインメモリ実装（`mock::MockTaskRepository`）に差し替える
//! - **ID の発番はストア任せ**: `_id` を省いて挿入し、MongoDB が発番した
//!   ObjectId をドメインの [`TaskId`] に変換して返す
//! - **削除は高々 1 件**: `delete_one` を使用し、一致件数で成否を返す

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
   Collection,
   bson::{doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use todoapp_domain::task::{Task, TaskDraft, TaskId};

use crate::error::InfraError;

/// タスクの BSON ドキュメント表現
///
/// `_id` は挿入時には省き、ストアに発番させる。
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDocument {
   #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
   pub id:          Option<ObjectId>,
   pub title:       String,
   pub description: String,
}

impl TaskDocument {
   /// ドキュメントをドメインエンティティに変換する
   ///
   /// `_id` を持たないドキュメントは保存済みタスクとして不正。
   fn into_task(self) -> Result<Task, InfraError> {
      let id = self
         .id
         .ok_or_else(|| InfraError::unexpected("ドキュメントに _id がありません"))?;
      Ok(Task::from_db(
         TaskId::from_string(id.to_hex()),
         self.title,
         self.description,
      ))
   }
}

/// ドメインの [`TaskId`]（不透明文字列）を ObjectId に解釈する
///
/// 解釈できない場合は `InvalidId`（API 層で 400 に変換される）。
fn parse_object_id(id: &TaskId) -> Result<ObjectId, InfraError> {
   ObjectId::parse_str(id.as_str()).map_err(|_| InfraError::invalid_id(id.as_str()))
}

/// タスクリポジトリトレイト
///
/// タスクの永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait TaskRepository: Send + Sync {
   /// 保存されているタスクを全件取得する
   ///
   /// 返却順はストアのデフォルト（実質挿入順だが契約ではない）。
   async fn find_all(&self) -> Result<Vec<Task>, InfraError>;

   /// タスクを挿入し、発番された ID 付きのエンティティを返す
   ///
   /// # エラー
   ///
   /// 挿入結果に ID が含まれない場合は `Unexpected` を返す。
   async fn insert(&self, draft: TaskDraft) -> Result<Task, InfraError>;

   /// ID でタスクを高々 1 件削除する
   ///
   /// # 戻り値
   ///
   /// - `Ok(true)`: 1 件削除した
   /// - `Ok(false)`: 一致するタスクが存在しなかった
   /// - `Err(_)`: ID が不正、またはデータベースエラー
   async fn delete_by_id(&self, id: &TaskId) -> Result<bool, InfraError>;
}

/// MongoDB 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct MongoTaskRepository {
   collection: Collection<TaskDocument>,
}

impl MongoTaskRepository {
   /// 新しいリポジトリインスタンスを作成する
   pub fn new(collection: Collection<TaskDocument>) -> Self {
      Self { collection }
   }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
   async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
      let cursor = self.collection.find(doc! {}).await?;
      let documents: Vec<TaskDocument> = cursor.try_collect().await?;

      documents
         .into_iter()
         .map(TaskDocument::into_task)
         .collect()
   }

   async fn insert(&self, draft: TaskDraft) -> Result<Task, InfraError> {
      let document = TaskDocument {
         id:          None,
         title:       draft.title().to_string(),
         description: draft.description().to_string(),
      };

      let result = self.collection.insert_one(&document).await?;
      let inserted_id = result
         .inserted_id
         .as_object_id()
         .ok_or_else(|| InfraError::unexpected("挿入結果に ObjectId がありません"))?;

      Ok(Task::from_db(
         TaskId::from_string(inserted_id.to_hex()),
         document.title,
         document.description,
      ))
   }

   async fn delete_by_id(&self, id: &TaskId) -> Result<bool, InfraError> {
      let object_id = parse_object_id(id)?;
      let result = self.collection.delete_one(doc! { "_id": object_id }).await?;

      Ok(result.deleted_count == 1)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;
   use crate::error::InfraErrorKind;

   // ===== parse_object_id テスト =====

   #[test]
   fn test_正しい16進文字列をobject_idに解釈できる() {
      let id = TaskId::from_string("65b2f0c4a1d2e3f4a5b6c7d8".to_string());
      let oid = parse_object_id(&id).unwrap();

      assert_eq!(oid.to_hex(), "65b2f0c4a1d2e3f4a5b6c7d8");
   }

   #[test]
   fn test_不正な文字列はinvalid_idになる() {
      let id = TaskId::from_string("not-an-object-id".to_string());
      let err = parse_object_id(&id).unwrap_err();

      assert!(matches!(
         err.kind(),
         InfraErrorKind::InvalidId(s) if s == "not-an-object-id"
      ));
   }

   // ===== TaskDocument テスト =====

   #[test]
   fn test_id付きドキュメントをタスクに変換できる() {
      let oid = ObjectId::new();
      let document = TaskDocument {
         id:          Some(oid),
         title:       "タイトル".to_string(),
         description: "説明".to_string(),
      };

      let task = document.into_task().unwrap();

      assert_eq!(task.id().as_str(), oid.to_hex());
      assert_eq!(task.title(), "タイトル");
      assert_eq!(task.description(), "説明");
   }

   #[test]
   fn test_idなしドキュメントの変換はunexpectedになる() {
      let document = TaskDocument {
         id:          None,
         title:       "タイトル".to_string(),
         description: "説明".to_string(),
      };

      let err = document.into_task().unwrap_err();

      assert!(matches!(err.kind(), InfraErrorKind::Unexpected(_)));
   }

   #[test]
   fn test_挿入時のシリアライズで_idが省略される() {
      let document = TaskDocument {
         id:          None,
         title:       "t".to_string(),
         description: "d".to_string(),
      };

      let bson = mongodb::bson::to_document(&document).unwrap();

      assert!(!bson.contains_key("_id"));
      assert_eq!(bson.get_str("title").unwrap(), "t");
      assert_eq!(bson.get_str("description").unwrap(), "d");
   }
}
