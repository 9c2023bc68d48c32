//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、前提条件チェックと永続化呼び出しはユースケースに委譲

pub mod health;
pub mod task;

pub use health::health_check;
pub use task::{TaskState, create_task, delete_task, list_tasks};
