//! JSON body extractor that reports rejections through the API's error
//! contract. The stock `axum::Json` rejection is a 422 with a plain-text
//! body; malformed or incomplete input is a 400 `{code, message}` here.

use crate::error::AppError;
use axum::extract::{FromRequest, Request};
use axum::Json;

pub struct Payload<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}
