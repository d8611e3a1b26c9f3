use std::path::Path;

/// Scale applied to normalized samples when none is configured.
pub const DEFAULT_HEIGHT_SCALE: f32 = 10.0;

/// Errors from heightmap loading.
#[derive(Debug, thiserror::Error)]
pub enum HeightmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("heightmap has {actual} bytes, expected {expected} for the configured width")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("heightmap width must be non-zero")]
    ZeroWidth,
}

/// A square grid of scaled heights with a parallel color per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: u32,
    heights: Vec<f32>,
    colors: Vec<[f32; 3]>,
}

impl Heightmap {
    /// Read a raw heightmap file of exactly `width * width` bytes.
    pub fn load(
        path: impl AsRef<Path>,
        width: u32,
        height_scale: f32,
    ) -> Result<Self, HeightmapError> {
        let path = path.as_ref();
        if width == 0 {
            return Err(HeightmapError::ZeroWidth);
        }
        // Reject a wrong-sized file before reading any of it.
        let expected = width as usize * width as usize;
        let actual = std::fs::metadata(path)?.len();
        if actual != expected as u64 {
            return Err(HeightmapError::SizeMismatch {
                expected,
                actual: usize::try_from(actual).unwrap_or(usize::MAX),
            });
        }
        let bytes = std::fs::read(path)?;
        tracing::debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes, width, height_scale)
    }

    /// Convert an in-memory buffer of `width * width` bytes.
    pub fn from_bytes(bytes: &[u8], width: u32, height_scale: f32) -> Result<Self, HeightmapError> {
        if width == 0 {
            return Err(HeightmapError::ZeroWidth);
        }
        let expected = width as usize * width as usize;
        if bytes.len() != expected {
            return Err(HeightmapError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let mut heights = Vec::with_capacity(expected);
        let mut colors = Vec::with_capacity(expected);
        for &b in bytes {
            let value = b as f32 / 256.0;
            heights.push(value * height_scale);
            // Color keeps the normalized value, not the scaled height.
            colors.push([0.0, value, 0.0]);
        }

        Ok(Self {
            width,
            heights,
            colors,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of samples (`width * width`).
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Scaled heights in row-major order.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// `[r, g, b]` per sample, same order as `heights()`.
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Height at grid column `col` and row `row`, if in range.
    pub fn height_at(&self, col: u32, row: u32) -> Option<f32> {
        if col >= self.width || row >= self.width {
            return None;
        }
        self.heights
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    pub fn min_height(&self) -> f32 {
        self.heights.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max_height(&self) -> f32 {
        self.heights.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

/// Write raw heightmap bytes to disk.
pub fn write_raw(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), HeightmapError> {
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn two_by_two_scenario() {
        let map = Heightmap::from_bytes(&[0, 128, 255, 64], 2, DEFAULT_HEIGHT_SCALE).unwrap();
        let h = map.heights();
        assert_eq!(h.len(), 4);
        assert!(approx(h[0], 0.0));
        assert!(approx(h[1], 5.0));
        assert!(approx(h[2], 9.9609375));
        assert!(approx(h[3], 2.5));
    }

    #[test]
    fn colors_use_normalized_value() {
        let map = Heightmap::from_bytes(&[0, 128, 255, 64], 2, DEFAULT_HEIGHT_SCALE).unwrap();
        let c = map.colors();
        assert_eq!(c.len(), 4);
        assert_eq!(c[1], [0.0, 0.5, 0.0]);
        assert!(approx(c[2][1], 255.0 / 256.0));
        assert!(c.iter().all(|c| c[0] == 0.0 && c[2] == 0.0));
    }

    #[test]
    fn every_byte_stays_in_range() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let map = Heightmap::from_bytes(&bytes, 16, DEFAULT_HEIGHT_SCALE).unwrap();
        assert_eq!(map.len(), 256);
        assert!(map.heights().iter().all(|h| (0.0..10.0).contains(h)));
        assert!(map.colors().iter().all(|c| (0.0..1.0).contains(&c[1])));
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let err = Heightmap::from_bytes(&[1, 2, 3], 2, DEFAULT_HEIGHT_SCALE).unwrap_err();
        assert!(matches!(
            err,
            HeightmapError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            Heightmap::from_bytes(&[], 0, DEFAULT_HEIGHT_SCALE),
            Err(HeightmapError::ZeroWidth)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Heightmap::load(dir.path().join("nope.raw"), 2, DEFAULT_HEIGHT_SCALE)
            .unwrap_err();
        assert!(matches!(err, HeightmapError::Io(_)));
    }

    #[test]
    fn oversized_file_is_rejected_by_length() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        // Sparse, so nothing is written to disk.
        tmp.as_file().set_len(1 << 30).unwrap();

        let err = Heightmap::load(tmp.path(), 65, DEFAULT_HEIGHT_SCALE).unwrap_err();
        assert!(matches!(
            err,
            HeightmapError::SizeMismatch {
                expected: 4225,
                actual: 1_073_741_824
            }
        ));
    }

    #[test]
    fn load_rejects_zero_width_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Heightmap::load(dir.path().join("nope.raw"), 0, DEFAULT_HEIGHT_SCALE)
            .unwrap_err();
        assert!(matches!(err, HeightmapError::ZeroWidth));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        write_raw(tmp.path(), &[10, 20, 30, 40, 50, 60, 70, 80, 90]).unwrap();

        let map = Heightmap::load(tmp.path(), 3, 1.0).unwrap();
        assert_eq!(map.width(), 3);
        assert!(approx(map.height_at(2, 1).unwrap(), 60.0 / 256.0));
        assert!(map.height_at(3, 0).is_none());
        assert!(approx(map.min_height(), 10.0 / 256.0));
        assert!(approx(map.max_height(), 90.0 / 256.0));
    }
}
