// ── Media decoding ─────────────────────────────────────────────────────────
//
// data:image/<subtype>;base64,<payload>  →  base64 bytes  →  RGBA pixels.
// Frames larger than MAX_DIMENSION on either side are downscaled first; the
// classifiers only need coarse lighting statistics.

use base64::Engine as _;
use image::GenericImageView;
use thiserror::Error;

pub const MAX_DIMENSION: u32 = 200;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("payload is not an image data URL")]
    NotAnImage,

    #[error("data URL is missing its base64 payload")]
    MissingPayload,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// A parsed `data:` URL. Borrowed from the caller's string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Full media type, e.g. `image/png`.
    pub media_type: &'a str,
    pub is_base64: bool,
    pub payload: &'a str,
}

/// Accept only `data:image/*` URLs.
pub fn parse_data_url(raw: &str) -> Result<DataUrl<'_>, MediaError> {
    let rest = raw.trim().strip_prefix("data:").ok_or(MediaError::NotAnImage)?;
    if !rest.starts_with("image/") {
        return Err(MediaError::NotAnImage);
    }
    let (header, payload) = rest.split_once(',').ok_or(MediaError::MissingPayload)?;
    let mut params = header.split(';');
    let media_type = params.next().unwrap_or_default();
    let is_base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));
    Ok(DataUrl {
        media_type,
        is_base64,
        payload,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Packed RGBA8, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// Decode an image data URL into (possibly downscaled) RGBA pixels.
pub fn decode_image(data_url: &str) -> Result<DecodedImage, MediaError> {
    let url = parse_data_url(data_url)?;
    if !url.is_base64 {
        return Err(MediaError::MissingPayload);
    }
    let bytes = base64::engine::general_purpose::STANDARD.decode(url.payload.trim())?;
    decode_image_bytes(&bytes)
}

/// Decode raw png/jpeg/gif/webp/bmp bytes.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DecodedImage, MediaError> {
    let mut img = image::load_from_memory(bytes)?;
    let (w, h) = img.dimensions();
    if w > MAX_DIMENSION || h > MAX_DIMENSION {
        img = img.thumbnail(MAX_DIMENSION, MAX_DIMENSION);
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("[media] Decoded {}x{} image (source {}x{})", width, height, w, h);
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
