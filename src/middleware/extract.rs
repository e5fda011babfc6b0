// src/middleware/extract.rs

use axum::{
    extract::{FromRequestParts, rejection::PathRejection, rejection::QueryRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
};

// `Path` e `Query` do axum respondem texto puro quando falham.
// Estes devolvem o mesmo 400 do envelope padrão.
#[derive(Debug)]
pub struct Path<T>(pub T);

#[derive(Debug)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);
        axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(value)| Path(value))
            .map_err(|rejection: PathRejection| {
                AppError::InvalidBody(rejection.body_text()).to_api_error(&locale)
            })
    }
}

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(&parts.headers);
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection: QueryRejection| {
                AppError::InvalidBody(rejection.body_text()).to_api_error(&locale)
            })
    }
}
