//! Axum extractors that validate request parts before the handler runs.
//!
//! Each extractor rejects with [`AppError`], so a handler only ever receives
//! fully validated, normalized DTOs. Handlers that take both path parameters
//! and a body use [`ValidatedPathJson`], which reports the problems of both
//! parts in one rejection.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde_json::Value;
use std::collections::HashMap;

use super::schema::{RequestSchema, object_from_pairs, validate_part};
use super::{FieldError, Location};
use crate::error::AppError;

/// Validated JSON body.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Validated query string.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

/// Validated path parameters.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

/// Validated path parameters plus JSON body.
#[derive(Debug)]
pub struct ValidatedPathJson<P, B>(pub P, pub B);

fn malformed(location: Location, reason: String) -> Vec<FieldError> {
    vec![FieldError::new(
        location,
        location.as_str(),
        "malformed",
        format!("\"{location}\" is malformed: {reason}"),
    )]
}

async fn body_part<T, S>(req: Request, state: &S) -> Result<T, Vec<FieldError>>
where
    S: Send + Sync,
    T: RequestSchema,
{
    let Json(value) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|rejection| malformed(Location::Body, rejection.body_text()))?;

    validate_part(Location::Body, value)
}

async fn query_part<T, S>(parts: &mut Parts, state: &S) -> Result<T, Vec<FieldError>>
where
    S: Send + Sync,
    T: RequestSchema,
{
    let Query(raw) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| malformed(Location::Query, rejection.body_text()))?;

    validate_part(Location::Query, object_from_pairs(raw))
}

async fn path_part<T, S>(parts: &mut Parts, state: &S) -> Result<T, Vec<FieldError>>
where
    S: Send + Sync,
    T: RequestSchema,
{
    let Path(raw) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| malformed(Location::Params, rejection.body_text()))?;

    validate_part(Location::Params, object_from_pairs(raw))
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        body_part(req, state)
            .await
            .map(ValidatedJson)
            .map_err(AppError::from_field_errors)
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        query_part(parts, state)
            .await
            .map(ValidatedQuery)
            .map_err(AppError::from_field_errors)
    }
}

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_part(parts, state)
            .await
            .map(ValidatedPath)
            .map_err(AppError::from_field_errors)
    }
}

impl<S, P, B> FromRequest<S> for ValidatedPathJson<P, B>
where
    S: Send + Sync,
    P: RequestSchema,
    B: RequestSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let path = path_part::<P, S>(&mut parts, state).await;
        let body = body_part::<B, S>(Request::from_parts(parts, body), state).await;

        match (path, body) {
            (Ok(path), Ok(body)) => Ok(ValidatedPathJson(path, body)),
            (path, body) => {
                let mut errors = path.err().unwrap_or_default();
                errors.extend(body.err().unwrap_or_default());
                Err(AppError::from_field_errors(errors))
            }
        }
    }
}
