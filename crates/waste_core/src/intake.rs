use crate::error::IntakeError;
use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Extensions offered by the file picker. The filter is advisory only; any
/// file that decodes as an image is accepted.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Previews are downscaled to fit inside this square.
pub const PREVIEW_MAX_SIDE: u32 = 512;

const FALLBACK_MIME: &str = "application/octet-stream";

/// The user's chosen image, held in memory until reset or replacement.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    mime: &'static str,
    bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| IntakeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let file_name = file_name.into();
        let mime = ImageFormat::from_path(&file_name)
            .map(|f| f.to_mime_type())
            .unwrap_or(FALLBACK_MIME);
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Decoded RGBA pixels for displaying a [`SelectedImage`] before upload.
#[derive(Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Preview {
    pub fn derive(image: &SelectedImage) -> Result<Self, IntakeError> {
        let decoded =
            image::load_from_memory(image.bytes()).map_err(|source| IntakeError::Decode {
                name: image.file_name().to_string(),
                source,
            })?;
        Ok(Self::from_image(decoded))
    }

    fn from_image(img: DynamicImage) -> Self {
        let img = if img.width() > PREVIEW_MAX_SIDE || img.height() > PREVIEW_MAX_SIDE {
            img.thumbnail(PREVIEW_MAX_SIDE, PREVIEW_MAX_SIDE)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            rgba: rgba.into_raw(),
        }
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.rgba.is_empty()
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preview({}x{})", self.width, self.height)
    }
}

/// Read a file from disk and derive its preview.
pub fn load(path: impl AsRef<Path>) -> Result<(SelectedImage, Preview), IntakeError> {
    let image = SelectedImage::from_path(path)?;
    let preview = Preview::derive(&image)?;
    tracing::debug!(
        "Loaded {} ({} bytes, preview {}x{})",
        image.file_name(),
        image.bytes().len(),
        preview.width,
        preview.height
    );
    Ok((image, preview))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;
    use tempfile::tempdir;

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgba([40u8, 160, 60, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn load_reads_file_and_derives_preview() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bottle.png");
        fs::write(&path, png_bytes(32, 16))?;

        let (image, preview) = load(&path)?;
        assert_eq!(image.file_name(), "bottle.png");
        assert_eq!(image.mime(), "image/png");
        assert!(!preview.is_empty());
        assert_eq!(preview.size(), [32, 16]);
        assert_eq!(preview.rgba.len(), 32 * 16 * 4);
        Ok(())
    }

    #[test]
    fn large_images_are_downscaled_keeping_aspect() {
        let image = SelectedImage::from_bytes("wide.png", png_bytes(1024, 256));
        let preview = Preview::derive(&image).unwrap();
        assert_eq!(preview.width, PREVIEW_MAX_SIDE);
        assert_eq!(preview.height, 128);
    }

    #[test]
    fn undecodable_bytes_are_rejected() {
        let image = SelectedImage::from_bytes("notes.jpg", b"plain text".to_vec());
        assert_eq!(image.mime(), "image/jpeg");
        let err = Preview::derive(&image).unwrap_err();
        assert!(matches!(err, IntakeError::Decode { name, .. } if name == "notes.jpg"));
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let image = SelectedImage::from_bytes("capture", png_bytes(4, 4));
        assert_eq!(image.mime(), "application/octet-stream");
        assert!(Preview::derive(&image).is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() -> Result<()> {
        let dir = tempdir()?;
        let err = load(dir.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, IntakeError::Io { .. }));
        Ok(())
    }
}
