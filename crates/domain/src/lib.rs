//! # TodoApp ドメイン層
//!
//! タスク管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートはビジネスルール（タスクの不変条件）だけを持ち、
//! HTTP やデータベースの詳細には依存しない。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`task`] - タスクエンティティと ID・作成入力
//! - [`error`] - ドメイン層エラー定義

pub mod error;
pub mod task;

pub use error::DomainError;
pub use task::{Task, TaskDraft, TaskId};
