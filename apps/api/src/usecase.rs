//! # ユースケース層
//!
//! ハンドラとリポジトリの間のアプリケーションロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリをコンストラクタで外部から注入。
//!   起動時の接続失敗は `None` として注入され、データ操作は
//!   一律に「未初期化」エラーになる
//! - **薄いハンドラ**: 前提条件チェック・検証・エラー変換はここに集約

pub mod task;

pub use task::TaskUseCaseImpl;
