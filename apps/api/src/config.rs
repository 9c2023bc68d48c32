//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | デフォルト |
//! |--------|------|-----------|
//! | `TODOAPP_HOST` | No | `0.0.0.0` |
//! | `TODOAPP_PORT` | No | `4000` |
//! | `MONGODB_URL` | No | `mongodb://127.0.0.1:27017` |
//! | `MONGODB_DATABASE` | No | `to-do-appdb` |
//! | `MONGODB_COLLECTION` | No | `tasks` |

use std::env;

use anyhow::Context as _;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
   /// バインドアドレス
   pub host:    String,
   /// ポート番号
   pub port:    u16,
   /// MongoDB 接続設定
   pub mongodb: MongoConfig,
}

/// MongoDB 接続設定
#[derive(Debug, Clone)]
pub struct MongoConfig {
   /// 接続 URL
   pub url:        String,
   /// データベース名
   pub database:   String,
   /// コレクション名
   pub collection: String,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   ///
   /// すべての変数にデフォルト値があるため、未設定でも起動できる。
   /// `TODOAPP_PORT` がポート番号として解釈できない場合のみエラーを返す。
   pub fn from_env() -> anyhow::Result<Self> {
      Ok(Self {
         host:    env::var("TODOAPP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
         port:    env::var("TODOAPP_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .context("TODOAPP_PORT は有効なポート番号である必要があります")?,
         mongodb: MongoConfig::from_env(),
      })
   }
}

impl MongoConfig {
   /// 環境変数から MongoDB 接続設定を読み込む
   fn from_env() -> Self {
      Self {
         url:        env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string()),
         database:   env::var("MONGODB_DATABASE").unwrap_or_else(|_| "to-do-appdb".to_string()),
         collection: env::var("MONGODB_COLLECTION").unwrap_or_else(|_| "tasks".to_string()),
      }
   }
}
