use std::fs;
use std::io::Cursor;
use std::path::Path;
use raylib::prelude::*;
use exif::{In, Reader, Tag, Value};
use tracing::{debug, warn};
use crate::error::{OverlayError, OverlayResult};

/// EXIF orientation of a JPEG, 1 (upright) when absent or unreadable.
pub fn exif_orientation(file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            debug!("no EXIF data: {}", e);
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> OverlayResult<Texture2D> {
    let file_bytes = fs::read(image_path)?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| OverlayError::Decoder(format!("failed to decode {}: {}", image_path.display(), e)))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Mirrored orientations are left as-is.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        1 => {}
        other => warn!(orientation = other, "ignoring mirrored EXIF orientation"),
    }
    debug!(path = %image_path.display(), orientation, "image decoded");

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| OverlayError::Decoder(format!("failed to create texture for {}: {}", image_path.display(), e)))?;

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_exif_means_upright() {
        assert_eq!(exif_orientation(b"\x89PNG\r\n\x1a\n"), 1);
        assert_eq!(exif_orientation(&[]), 1);
    }
}
