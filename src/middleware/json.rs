// src/middleware/json.rs

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
};

// Json + Validate num passo só. Corpo malformado e payload inválido
// respondem 400 no envelope padrão, antes de qualquer acesso ao banco.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(req.headers());

        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()).to_api_error(&locale))?;

        payload
            .validate()
            .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

        Ok(ValidatedJson(payload))
    }
}
