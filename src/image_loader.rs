//! Item image loading.
//!
//! Images are stored inline as `data:` URLs so the inventory document is
//! self-contained. The bytes are only sniffed to pick the MIME type; they are
//! never decoded.

use crate::types::ImageRef;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while reading an item image
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized image format: {0}")]
    UnknownFormat(#[from] image::ImageError),

    #[error("Image file is empty")]
    Empty,
}

/// Encode image bytes as a data URL.
pub fn image_from_bytes(bytes: &[u8]) -> Result<ImageRef, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    let format = image::guess_format(bytes)?;
    let mime = format.to_mime_type();
    Ok(ImageRef::new(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
}

/// Read an image file as a data URL. No path means no image.
pub fn load_image(path: Option<&Path>) -> Result<Option<ImageRef>, ImageError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = std::fs::read(path)?;
    let image = image_from_bytes(&bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Loaded item image");
    Ok(Some(image))
}

/// Read an image on a background thread; the result arrives on the receiver.
pub fn load_image_async(path: Option<PathBuf>) -> Receiver<Result<Option<ImageRef>, ImageError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load_image(path.as_deref());
        if let Err(e) = &result {
            warn!(error = %e, "Image load failed");
        }
        // Receiver dropped means nobody waits for the image anymore.
        let _ = tx.send(result);
    });
    rx
}
