//! Texture asset loading.
//!
//! Textures are decoded to RGBA8 pixel data exactly once, at startup, and
//! the decoded pixels are reused for the whole session. The renderer
//! consumes pixel data by reference, never file paths.

use std::path::Path;

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded texture: tightly packed RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct TextureData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureData {
    /// Decode an image file to RGBA8.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        tracing::debug!("decoded texture {}: {}x{}", path.display(), width, height);
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Procedural checkerboard fallback, used when no texture file is
    /// given or decoding fails.
    pub fn checkerboard(width: u32, height: u32) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let c = if ((x / 16) + (y / 16)) % 2 == 0 { 220 } else { 40 };
                pixels.extend_from_slice(&[c, c, 255, 255]);
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_dimensions_and_packing() {
        let tex = TextureData::checkerboard(64, 32);
        assert_eq!(tex.width(), 64);
        assert_eq!(tex.height(), 32);
        assert_eq!(tex.pixels().len(), 64 * 32 * 4);
        // Opaque alpha everywhere.
        assert!(tex.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureData::checkerboard(64, 64);
        let first = tex.pixels()[0];
        // 16 pixels to the right lands in the neighboring square.
        let neighbor = tex.pixels()[16 * 4];
        assert_ne!(first, neighbor);
    }

    #[test]
    fn load_missing_file_errors() {
        let err = TextureData::load(Path::new("/nonexistent/texture.png"));
        assert!(err.is_err());
    }
}
