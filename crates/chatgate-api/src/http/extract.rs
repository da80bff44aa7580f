//! JSON body extractor whose rejections use the envelope format.

use axum::extract::FromRequest;

use super::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
