use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Guess the media type of an asset from its file extension.
pub fn media_type_for(path: &Path) -> &'static str {
  let Some(extension) = path.extension().and_then(|value| value.to_str()) else {
    return FALLBACK_MEDIA_TYPE;
  };

  match extension.to_ascii_lowercase().as_str() {
    "png" => "image/png",
    "gif" => "image/gif",
    "jpg" | "jpeg" => "image/jpeg",
    "svg" => "image/svg+xml",
    "webp" => "image/webp",
    "avif" => "image/avif",
    "bmp" => "image/bmp",
    "ico" => "image/vnd.microsoft.icon",
    "woff" => "font/woff",
    "woff2" => "font/woff2",
    "ttf" => "font/ttf",
    "otf" => "font/otf",
    "eot" => "application/vnd.ms-fontobject",
    "css" => "text/css",
    "js" => "text/javascript",
    "htm" | "html" => "text/html",
    "json" => "application/json",
    "txt" => "text/plain",
    "xml" => "application/xml",
    "mp3" => "audio/mpeg",
    "ogg" => "audio/ogg",
    "wav" => "audio/wav",
    "mp4" => "video/mp4",
    "webm" => "video/webm",
    _ => FALLBACK_MEDIA_TYPE,
  }
}

/// Encode `data` as a base64 `data:` URI typed after `path`.
pub fn encode_data_uri(path: &Path, data: &[u8]) -> String {
  format!(
    "data:{};base64,{}",
    media_type_for(path),
    general_purpose::STANDARD.encode(data)
  )
}
