// commands/analyze.rs — POST /api/analyze/image, POST /api/analyze/voice.
//
// Decoding and scoring run on the blocking pool. A payload that is present
// but unreadable degrades to a low-confidence report instead of an error.

use crate::atoms::error::{ServerError, ServerResult};
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use log::{info, warn};
use mindecho_core::media::{decode_image, parse_data_url};
use mindecho_core::report::{ImageReport, VoiceReport};
use serde::Deserialize;

const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    pub image: String,
}

// ── Image ──────────────────────────────────────────────────────────────

pub async fn analyze_image(
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> ServerResult<Json<ImageReport>> {
    let Json(request) = payload.map_err(|_| ServerError::bad_request("Invalid image data"))?;
    if parse_data_url(&request.image).is_err() {
        return Err(ServerError::bad_request("Invalid image data"));
    }

    let data_url_len = request.image.len();
    let decoded = tokio::task::spawn_blocking(move || {
        decode_image(&request.image).map(|img| {
            info!("[analyze] Image {}x{}", img.width, img.height);
            ImageReport::analyze(&img.rgba)
        })
    })
    .await;

    let report = match decoded {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            warn!("[analyze] Image decode failed, using fallback: {}", e);
            ImageReport::fallback(data_url_len)
        }
        Err(e) => {
            warn!("[analyze] Image task failed, using fallback: {}", e);
            ImageReport::fallback(data_url_len)
        }
    };
    Ok(Json(report))
}

// ── Voice ──────────────────────────────────────────────────────────────

enum AudioUpload {
    Missing,
    Unreadable(String),
    Bytes(Vec<u8>),
}

async fn read_audio_field(multipart: &mut Multipart) -> AudioUpload {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(AUDIO_FIELD) => {
                return match field.bytes().await {
                    Ok(bytes) => AudioUpload::Bytes(bytes.to_vec()),
                    Err(e) => AudioUpload::Unreadable(e.to_string()),
                };
            }
            Ok(Some(_)) => continue,
            Ok(None) => return AudioUpload::Missing,
            Err(e) => return AudioUpload::Unreadable(e.to_string()),
        }
    }
}

pub async fn analyze_voice(
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<VoiceReport>> {
    let mut multipart =
        multipart.map_err(|_| ServerError::bad_request("No audio file provided"))?;

    let bytes = match read_audio_field(&mut multipart).await {
        AudioUpload::Missing => return Err(ServerError::bad_request("No audio file provided")),
        AudioUpload::Unreadable(e) => {
            warn!("[analyze] Audio upload unreadable: {}", e);
            return Ok(Json(VoiceReport::uncertain()));
        }
        AudioUpload::Bytes(bytes) => bytes,
    };

    info!("[analyze] Voice sample {} bytes", bytes.len());
    let report = tokio::task::spawn_blocking(move || VoiceReport::analyze(&bytes))
        .await
        .unwrap_or_else(|e| {
            warn!("[analyze] Voice task failed: {}", e);
            VoiceReport::uncertain()
        });
    Ok(Json(report))
}
