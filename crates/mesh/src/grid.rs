use terrainview_common::TerrainConfig;

/// Errors from mesh generation.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("mesh of width {width} needs {needed} heights, got {got}")]
    NotEnoughHeights { width: u32, needed: usize, got: usize },
    #[error("heightmap width {heightmap} does not match grid width {grid}")]
    WidthMismatch { heightmap: u32, grid: u32 },
    #[error("grid of width {0} overflows 32-bit indices")]
    IndexOverflow(u32),
}

/// Placement of the height grid in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Samples per side.
    pub width: u32,
    /// World units between neighbouring samples on X and Z.
    pub step: f32,
    /// Added to every vertex Z.
    pub z_offset: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::from(&TerrainConfig::default())
    }
}

impl From<&TerrainConfig> for GridLayout {
    fn from(cfg: &TerrainConfig) -> Self {
        Self {
            width: cfg.width,
            step: cfg.step,
            z_offset: cfg.z_offset,
        }
    }
}

impl GridLayout {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.width as usize * self.width as usize
    }

    pub fn index_count(&self) -> usize {
        let cells = self.width.saturating_sub(1) as usize;
        6 * cells * cells
    }

    /// World-space extent covered along X and Z.
    pub fn extent(&self) -> f32 {
        self.width.saturating_sub(1) as f32 * self.step
    }
}

/// One vertex per grid sample, rows along Z and columns along X.
///
/// The height of vertex `row * width + col` is `heights[row * width + col]`.
pub fn generate_vertices(heights: &[f32], layout: &GridLayout) -> Result<Vec<[f32; 3]>, MeshError> {
    let needed = layout.vertex_count();
    if heights.len() < needed {
        return Err(MeshError::NotEnoughHeights {
            width: layout.width,
            needed,
            got: heights.len(),
        });
    }
    if heights.len() > needed {
        tracing::warn!(
            "ignoring {} trailing heights beyond a {}x{} grid",
            heights.len() - needed,
            layout.width,
            layout.width
        );
    }

    let mut vertices = Vec::with_capacity(needed);
    let mut samples = heights.iter();
    for row in 0..layout.width {
        let z = row as f32 * layout.step + layout.z_offset;
        for col in 0..layout.width {
            let x = col as f32 * layout.step;
            // Length was checked above.
            let y = samples.next().copied().unwrap_or_default();
            vertices.push([x, y, z]);
        }
    }
    Ok(vertices)
}

/// Two triangles per grid cell, `6 * (width - 1)^2` indices in total.
pub fn generate_indices(width: u32) -> Result<Vec<u32>, MeshError> {
    if (width as u64) * (width as u64) > u32::MAX as u64 {
        return Err(MeshError::IndexOverflow(width));
    }

    let cells = width.saturating_sub(1);
    let mut indices = Vec::with_capacity(6 * cells as usize * cells as usize);
    for row in 0..cells {
        for col in 0..cells {
            let i = row * width + col;
            indices.extend_from_slice(&[i, i + width + 1, i + width, i, i + 1, i + width + 1]);
        }
    }
    Ok(indices)
}
