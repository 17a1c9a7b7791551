//! PNG export format
//!
//! Encodes straight RGBA surfaces using the `image` crate.

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use placard_core::{
    error::{ExportError, Result},
    traits::Exporter,
    BitmapData,
};

/// Encode a straight-RGBA bitmap as PNG
///
/// Refuses zero-sized and fully transparent surfaces: there is nothing
/// worth saving in either.
pub fn encode_bitmap_to_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    if bitmap.width == 0 || bitmap.height == 0 || bitmap.is_blank() {
        return Err(ExportError::EmptySurface.into());
    }

    let expected_size = bitmap.width as usize * bitmap.height as usize * 4;
    if bitmap.data.len() != expected_size {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer size mismatch: expected {} bytes for {}x{} RGBA, got {}",
            expected_size,
            bitmap.width,
            bitmap.height,
            bitmap.data.len()
        ))
        .into());
    }

    let img: RgbaImage = ImageBuffer::from_raw(bitmap.width, bitmap.height, bitmap.data.clone())
        .ok_or_else(|| {
            ExportError::EncodingFailed("Failed to create image buffer from RGBA data".into())
        })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            img.as_raw(),
            bitmap.width,
            bitmap.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    log::debug!(
        "PNG: encoded {}x{} into {} bytes",
        bitmap.width,
        bitmap.height,
        png_data.len()
    );
    Ok(png_data)
}

/// PNG exporter for finished surfaces
///
/// # Examples
///
/// ```
/// use placard_export::PngExporter;
/// use placard_core::traits::Exporter;
///
/// let exporter = PngExporter::new();
/// assert_eq!(exporter.extension(), "png");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use placard_core::PlacardError;

    fn bitmap(data: Vec<u8>, width: u32, height: u32) -> BitmapData {
        BitmapData {
            width,
            height,
            data,
        }
    }

    #[test]
    fn test_png_exporter_identity() {
        let exporter = PngExporter::new();
        assert_eq!(exporter.name(), "png");
        assert_eq!(exporter.extension(), "png");
        assert_eq!(exporter.mime_type(), "image/png");
    }

    #[test]
    fn test_png_export_rgba() {
        let data = vec![
            255, 0, 0, 255, // Red
            0, 255, 0, 255, // Green
            0, 0, 255, 255, // Blue
            0, 0, 0, 0, // Transparent
        ];
        let png = PngExporter::new().export(&bitmap(data, 2, 2)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_surfaces_rejected() {
        let blank = bitmap(vec![0; 16], 2, 2);
        assert!(matches!(
            PngExporter::new().export(&blank),
            Err(PlacardError::ExportFailed(ExportError::EmptySurface))
        ));
        assert!(matches!(
            PngExporter::new().export(&bitmap(vec![], 0, 0)),
            Err(PlacardError::ExportFailed(ExportError::EmptySurface))
        ));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let short = bitmap(vec![0, 0, 0, 255], 2, 2);
        assert!(matches!(
            PngExporter::new().export(&short),
            Err(PlacardError::ExportFailed(ExportError::EncodingFailed(_)))
        ));
    }
}
