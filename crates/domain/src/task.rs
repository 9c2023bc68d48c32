//! # タスク
//!
//! このシステムの唯一の永続エンティティ。`id`・`title`・`description` を持ち、
//! 作成 → 参照 → 削除のライフサイクルのみを持つ（更新操作は存在しない）。
//!
//! ## 設計判断
//!
//! ### Newtype パターンの採用
//!
//! `TaskId` は永続化層が発番する不透明な識別子（ObjectId の 16 進文字列）を
//! ラップした Newtype である。これにより:
//!
//! - 型安全性: ただの `String` と取り違えない
//! - 不透明性: ドメイン層は ID の内部形式（BSON ObjectId）を知らない
//!
//! ### TaskDraft による不変条件の強制
//!
//! 保存済みタスクは必ず非空の `title`/`description` を持つ。
//! [`TaskDraft::new`] が唯一の作成入力の構築経路であり、
//! 空文字列をコンパイル境界で弾くことでこの不変条件を保証する。
//!
//! ## 使用例
//!
//! ```rust
//! use todoapp_domain::task::{Task, TaskDraft, TaskId};
//!
//! // クライアント入力から作成ドラフトを構築（検証付き）
//! let draft = TaskDraft::new("買い物", "牛乳を買う").unwrap();
//!
//! // 永続化層が発番した ID から復元
//! let task = Task::from_db(
//!     TaskId::from_string("65b2f0c4a1d2e3f4a5b6c7d8".to_string()),
//!     draft.title().to_string(),
//!     draft.description().to_string(),
//! );
//! assert_eq!(task.title(), "買い物");
//! ```

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// タスクの一意識別子
///
/// 永続化層（ドキュメントストア）が挿入時に発番する。クライアントが
/// 作成時に指定することはない。ドメイン層では不透明な文字列として扱い、
/// 形式の検証はインフラ層の責務とする。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TaskId(String);

impl TaskId {
   /// 永続化層が発番した識別子文字列から復元する
   pub fn from_string(id: String) -> Self {
      Self(id)
   }

   /// 識別子の文字列表現を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// タスクエンティティ
///
/// 保存済みのタスク。更新操作が存在しないため、作成後の
/// `title`/`description` はライフサイクルを通じて不変である。
///
/// # 不変条件
///
/// - `title` と `description` は非空（[`TaskDraft`] が保証）
/// - `id` は一意（永続化層が保証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
   id:          TaskId,
   title:       String,
   description: String,
}

impl Task {
   /// データベースから取得した値でエンティティを復元する
   ///
   /// 保存時点で不変条件は検証済みのため、ここでは再検証しない。
   pub fn from_db(id: TaskId, title: String, description: String) -> Self {
      Self {
         id,
         title,
         description,
      }
   }

   /// タスク ID を取得する
   pub fn id(&self) -> &TaskId {
      &self.id
   }

   /// タイトルを取得する
   pub fn title(&self) -> &str {
      &self.title
   }

   /// 説明を取得する
   pub fn description(&self) -> &str {
      &self.description
   }
}

/// タスク作成入力
///
/// まだ ID を持たない、挿入前のタスク。[`TaskDraft::new`] だけが
/// 構築経路であり、`title`/`description` の非空を保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
   title:       String,
   description: String,
}

impl TaskDraft {
   /// 作成入力を検証して構築する
   ///
   /// # エラー
   ///
   /// `title` または `description` が空文字列の場合は
   /// [`DomainError::Validation`] を返す。
   pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, DomainError> {
      let title = title.into();
      let description = description.into();

      if title.is_empty() || description.is_empty() {
         return Err(DomainError::Validation(
            "title と description は必須です".to_string(),
         ));
      }

      Ok(Self { title, description })
   }

   /// タイトルを取得する
   pub fn title(&self) -> &str {
      &self.title
   }

   /// 説明を取得する
   pub fn description(&self) -> &str {
      &self.description
   }
}
