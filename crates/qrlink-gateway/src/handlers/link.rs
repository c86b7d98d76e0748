use crate::error::{AppError, Result};
use crate::model::{
    CreateShortUrlRequest, CreateShortUrlResponse, StatsResponse, UpdateUrlRequest,
    UpdateUrlResponse,
};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use qrlink_core::{ShortCode, ShortenerError};

/// Treats absent, `null` and blank strings alike.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn create_short_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<Json<CreateShortUrlResponse>> {
    let Json(request) = payload?;
    let target_url = required(request.target_url)
        .ok_or_else(|| AppError::BadRequest("targetUrl is required".to_string()))?;

    let link = state.shortener().shorten(target_url).await?;

    Ok(Json(CreateShortUrlResponse {
        short_url: link.short_url,
        qr_code_data_url: link.qr.data_url(),
    }))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(short_code)?;
    let target_url = state.shortener().visit(&code).await?;

    let location = HeaderValue::from_bytes(target_url.as_bytes())
        .map_err(|_| ShortenerError::UnusableTarget(code.to_string()))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub async fn update_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UpdateUrlRequest>, JsonRejection>,
) -> Result<Json<UpdateUrlResponse>> {
    let Json(request) = payload?;
    let (Some(short_code), Some(new_url)) =
        (required(request.short_code), required(request.new_url))
    else {
        return Err(AppError::BadRequest(
            "shortCode and newUrl are required".to_string(),
        ));
    };

    let code = ShortCode::new(short_code)?;
    let new_url = state.shortener().retarget(&code, new_url).await?;

    Ok(Json(UpdateUrlResponse {
        success: true,
        message: format!("short code [{code}] now points to {new_url}"),
    }))
}

pub async fn stats_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let code = ShortCode::new(short_code)?;
    let stats = state.shortener().stats(&code).await?;
    Ok(Json(stats.into()))
}
