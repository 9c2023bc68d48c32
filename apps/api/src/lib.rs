//! # TodoApp API ライブラリ
//!
//! API サーバーの設定・ハンドラ・ユースケースを公開する。
//! 統合テストから内部モジュールへのアクセスを提供する。

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
