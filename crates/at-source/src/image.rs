use std::path::Path;

use anyhow::{Context, Result};
use at_core::error::CoreError;
use at_core::frame::FrameBuffer;
use image::DynamicImage;

/// Charge une image depuis le disque en RGBA.
///
/// Any format enabled on the `image` dependency (PNG, JPEG, BMP, GIF) is
/// accepted; the format is guessed from the file contents.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded, or if the image
/// has a zero dimension.
///
/// # Example
/// ```no_run
/// use at_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// println!("{}×{}", frame.width, frame.height);
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("Impossible d'ouvrir {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Format illisible : {}", path.display()))?
        .decode()
        .with_context(|| format!("Impossible de décoder {}", path.display()))?;
    let frame = frame_from_image(&img)
        .with_context(|| format!("Image inutilisable : {}", path.display()))?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Convert a decoded image into a [`FrameBuffer`].
///
/// # Errors
/// [`CoreError::InvalidDimensions`] if either side is zero.
pub fn frame_from_image(img: &DynamicImage) -> Result<FrameBuffer, CoreError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn png_round_trip_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("damier.png");
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 1, Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(0, 0), (255, 0, 0));
        assert_eq!(frame.pixel(2, 1), (10, 20, 30));
        assert_eq!(frame.pixel(1, 0), (0, 0, 0));
    }

    #[test]
    fn format_is_guessed_from_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sans_extension");
        let png = dir.path().join("tmp.png");
        RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]))
            .save(&png)
            .unwrap();
        std::fs::rename(&png, &path).unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!(frame.pixel(1, 1), (255, 255, 255));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("absent.png")).unwrap_err();
        assert!(err.to_string().contains("absent.png"));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faux.png");
        std::fs::write(&path, b"pas une image").unwrap();
        assert!(load_image(&path).is_err());
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let img = DynamicImage::new_rgba8(0, 5);
        assert_eq!(
            frame_from_image(&img),
            Err(CoreError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
    }
}
