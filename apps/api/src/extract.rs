//! # リクエストボディ抽出
//!
//! `Content-Type` に応じて JSON または URL エンコードフォームとして
//! ボディを解釈するエクストラクタ。
//!
//! 元のサービスは両形式を受け付けるため、単一のエクストラクタで
//! 切り替える。どちらでもない `Content-Type` は 400 を返す。

use axum::{
   Form,
   Json,
   extract::{FromRequest, Request},
   http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON / フォームの両対応ボディエクストラクタ
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
   S: Send + Sync,
   T: DeserializeOwned,
{
   type Rejection = ApiError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      let content_type = req
         .headers()
         .get(CONTENT_TYPE)
         .and_then(|value| value.to_str().ok())
         .unwrap_or_default();

      if content_type.starts_with("application/json") {
         let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
         return Ok(Self(payload));
      }

      if content_type.starts_with("application/x-www-form-urlencoded") {
         let Form(payload) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
         return Ok(Self(payload));
      }

      Err(ApiError::BadRequest(format!(
         "Unsupported content type: {content_type:?}"
      )))
   }
}
