/// Picked-photo loader
///
/// Reading the picked file is the only operation in the app that suspends;
/// decoding the bytes into pixels is CPU work and runs on a blocking
/// worker so the UI thread never stalls on a large photo.
use image::RgbaImage;
use std::path::PathBuf;
use tokio::task;

use crate::filter::FilterError;

/// Load and decode a photo into RGBA8 pixels.
///
/// # Errors
/// * `MissingImageData` - the file is unreadable or empty
/// * `Decode` - the bytes are not a decodable image
pub async fn load_photo(path: PathBuf) -> Result<RgbaImage, FilterError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| FilterError::MissingImageData)?;

    if bytes.is_empty() {
        return Err(FilterError::MissingImageData);
    }

    // Decoding is CPU-intensive, keep it off the async runtime
    let pixels = task::spawn_blocking(move || decode_photo(&bytes))
        .await
        .map_err(|e| FilterError::Decode(format!("decode task failed: {e}")))??;

    println!(
        "📷 Loaded photo: {}x{} from {}",
        pixels.width(),
        pixels.height(),
        path.display()
    );

    Ok(pixels)
}

/// Blocking decode of raw photo bytes.
fn decode_photo(bytes: &[u8]) -> Result<RgbaImage, FilterError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| FilterError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}
