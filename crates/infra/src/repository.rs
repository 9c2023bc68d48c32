//! # リポジトリ実装
//!
//! タスクの永続化操作を定義するトレイトと、その MongoDB 実装。

pub mod task_repository;

pub use task_repository::{MongoTaskRepository, TaskRepository};
