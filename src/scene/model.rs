use glam::{Mat4, Vec3};

use super::bounds::Aabb;

/// One drawable triangle list, flattened into model space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Node or mesh name from the source file.
    pub name: String,
    /// Vertex positions with node transforms applied.
    pub positions: Vec<[f32; 3]>,
    /// First texture coordinate set, zeroed when the source has none.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices into `positions`.
    pub indices: Vec<u32>,
    /// Material base color factor, multiplied with the override texture.
    pub base_color: [f32; 4],
}

impl MeshData {
    /// Bounding box of the vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied().map(Vec3::from))
    }
}

/// Decoded RGBA8 image shared by every mesh of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first.
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// 1x1 opaque white, used when the override image is unavailable.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }
}

/// The loaded model: its meshes, the texture applied to all of them, and
/// a world-space position.
///
/// Only `position` changes after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// World-space translation of the whole model.
    pub position: Vec3,
    meshes: Vec<MeshData>,
    texture: TextureImage,
    bounds: Aabb,
}

impl Model {
    /// Assemble a model at the origin.
    pub fn new(meshes: Vec<MeshData>, texture: TextureImage) -> Self {
        let bounds = meshes.iter().fold(Aabb::EMPTY, |mut acc, mesh| {
            acc.union(&mesh.bounds());
            acc
        });
        Self {
            position: Vec3::ZERO,
            meshes,
            texture,
            bounds,
        }
    }

    /// All meshes in draw order.
    pub fn meshes(&self) -> &[MeshData] {
        &self.meshes
    }

    /// The override texture.
    pub fn texture(&self) -> &TextureImage {
        &self.texture
    }

    /// Bounding box in model space.
    pub fn local_bounds(&self) -> Aabb {
        self.bounds
    }

    /// Bounding box in world space.
    pub fn world_bounds(&self) -> Aabb {
        self.bounds.translated(self.position)
    }

    /// Model-to-world transform.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// Total triangle count across meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// An axis-aligned quad spanning `min..max` in the XY plane at `z`.
    pub(crate) fn quad(min: [f32; 2], max: [f32; 2], z: f32) -> MeshData {
        MeshData {
            name: "quad".into(),
            positions: vec![
                [min[0], min[1], z],
                [max[0], min[1], z],
                [max[0], max[1], z],
                [min[0], max[1], z],
            ],
            uvs: vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
            indices: vec![0, 1, 2, 0, 2, 3],
            base_color: [1.0; 4],
        }
    }

    /// A one-quad model spanning `min..max`.
    pub(crate) fn quad_model(min: [f32; 2], max: [f32; 2]) -> Model {
        Model::new(vec![quad(min, max, 0.0)], TextureImage::white())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{quad, quad_model};
    use super::*;

    #[test]
    fn bounds_cover_every_mesh() {
        let model = Model::new(
            vec![
                quad([-1.0, -1.0], [1.0, 1.0], 0.0),
                quad([0.0, 0.0], [3.0, 2.0], -2.0),
            ],
            TextureImage::white(),
        );
        let bounds = model.local_bounds();
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 0.0));
        assert_eq!(model.triangle_count(), 4);
    }

    #[test]
    fn world_bounds_follow_position() {
        let mut model = quad_model([-1.0, -1.0], [1.0, 1.0]);
        model.position.y = -3.0;
        let bounds = model.world_bounds();
        assert_eq!(bounds.center(), Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(model.transform().w_axis.y, -3.0);
    }

    #[test]
    fn model_without_meshes_is_empty() {
        let model = Model::new(Vec::new(), TextureImage::white());
        assert!(model.local_bounds().is_empty());
        assert_eq!(model.triangle_count(), 0);
    }
}
