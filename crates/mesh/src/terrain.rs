use crate::grid::{GridLayout, MeshError, generate_indices, generate_vertices};
use glam::Vec3;
use terrainview_heightmap::Heightmap;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// CPU-side terrain geometry ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Mesh a heightmap using its own width for the grid.
    pub fn build(heightmap: &Heightmap, layout: &GridLayout) -> Result<Self, MeshError> {
        if heightmap.width() != layout.width {
            return Err(MeshError::WidthMismatch {
                heightmap: heightmap.width(),
                grid: layout.width,
            });
        }

        let positions = generate_vertices(heightmap.heights(), layout)?;
        let indices = generate_indices(layout.width)?;
        let colors = heightmap.colors().to_vec();

        tracing::debug!(
            "built terrain mesh: {} vertices, {} triangles",
            positions.len(),
            indices.len() / 3
        );

        Ok(Self {
            positions,
            colors,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Bounds of all positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Aabb { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrainview_heightmap::{DEFAULT_HEIGHT_SCALE, Pattern, synthesize};

    #[test]
    fn build_two_by_two() {
        let map = Heightmap::from_bytes(&[0, 128, 255, 64], 2, DEFAULT_HEIGHT_SCALE).unwrap();
        let mesh = TerrainMesh::build(&map, &GridLayout::new(2)).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.colors.len(), 4);
        assert_eq!(mesh.indices, vec![0, 3, 2, 0, 1, 3]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions[1][1], map.heights()[1]);
    }

    #[test]
    fn counts_follow_width() {
        let width = 65;
        let map =
            Heightmap::from_bytes(&synthesize(width, Pattern::Radial), width, DEFAULT_HEIGHT_SCALE)
                .unwrap();
        let mesh = TerrainMesh::build(&map, &GridLayout::new(width)).unwrap();

        assert_eq!(mesh.vertex_count(), 65 * 65);
        assert_eq!(mesh.index_count(), 6 * 64 * 64);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let map = Heightmap::from_bytes(&synthesize(65, Pattern::Flat), 65, 10.0).unwrap();
        let err = TerrainMesh::build(&map, &GridLayout::new(6)).unwrap_err();
        assert!(matches!(
            err,
            MeshError::WidthMismatch {
                heightmap: 65,
                grid: 6
            }
        ));
    }

    #[test]
    fn bounds_cover_grid() {
        let map = Heightmap::from_bytes(&synthesize(11, Pattern::Ramp), 11, 10.0).unwrap();
        let mesh = TerrainMesh::build(&map, &GridLayout::new(11)).unwrap();
        let bounds = mesh.bounds().unwrap();

        assert!((bounds.min.x - 0.0).abs() < 1e-5);
        assert!((bounds.max.x - 1.0).abs() < 1e-5);
        assert!((bounds.min.z + 99.0).abs() < 1e-4);
        assert!((bounds.max.z + 98.0).abs() < 1e-4);
        assert_eq!(bounds.min.y, 0.0);
        assert!(bounds.max.y < 10.0);
        assert!(bounds.size().x > 0.0);
        assert!((bounds.center().x - 0.5).abs() < 1e-5);
        assert!((bounds.center().z + 98.5).abs() < 1e-4);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(TerrainMesh::default().bounds().is_none());
        assert!(TerrainMesh::default().is_empty());
    }
}
