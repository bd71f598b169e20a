//! glTF 2.0 scene flattening.
//!
//! Walks the default scene graph, bakes each node's world transform into
//! its mesh positions, and emits one [`MeshData`] per triangle primitive.

use glam::{Mat4, Vec3};
use gltf::buffer::Source;
use gltf::mesh::Mode;
use gltf::Gltf;

use super::source::{read_referenced, AssetSource};
use crate::error::OrbitViewError;
use crate::scene::MeshData;

/// Read and flatten the glTF (`.gltf` or `.glb`) scene at `scene_uri`.
pub async fn load_meshes<S: AssetSource>(
    source: &S,
    scene_uri: &str,
) -> Result<Vec<MeshData>, OrbitViewError> {
    let bytes = source.read(scene_uri).await?;
    let gltf = Gltf::from_slice(&bytes)?;
    let buffers = resolve_buffers(source, scene_uri, gltf.blob, &gltf.document)
        .await?;
    let meshes = collect_meshes(&gltf.document, &buffers)?;
    log::debug!(
        "{scene_uri}: {} buffers, {} triangle meshes",
        buffers.len(),
        meshes.len()
    );
    Ok(meshes)
}

/// Fetch every buffer the document declares, in declaration order.
async fn resolve_buffers<S: AssetSource>(
    source: &S,
    scene_uri: &str,
    mut blob: Option<Vec<u8>>,
    document: &gltf::Document,
) -> Result<Vec<Vec<u8>>, OrbitViewError> {
    let mut buffers = Vec::new();
    for buffer in document.buffers() {
        let data = match buffer.source() {
            Source::Bin => blob.take().ok_or_else(|| {
                OrbitViewError::AssetLoad(format!(
                    "{scene_uri}: buffer {} refers to a missing GLB binary chunk",
                    buffer.index()
                ))
            })?,
            Source::Uri(uri) => read_referenced(source, scene_uri, uri).await?,
        };
        if data.len() < buffer.length() {
            return Err(OrbitViewError::AssetLoad(format!(
                "{scene_uri}: buffer {} has {} bytes, expected {}",
                buffer.index(),
                data.len(),
                buffer.length()
            )));
        }
        buffers.push(data);
    }
    Ok(buffers)
}

/// Flatten the default scene (or the first one) into world-space meshes.
fn collect_meshes(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
) -> Result<Vec<MeshData>, OrbitViewError> {
    let Some(scene) = document.default_scene().or_else(|| document.scenes().next())
    else {
        log::warn!("glTF document has no scenes");
        return Ok(Vec::new());
    };

    let mut meshes = Vec::new();
    for node in scene.nodes() {
        visit_node(&node, Mat4::IDENTITY, buffers, &mut meshes)?;
    }
    Ok(meshes)
}

fn visit_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[Vec<u8>],
    out: &mut Vec<MeshData>,
) -> Result<(), OrbitViewError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let name = node.name().or_else(|| mesh.name()).unwrap_or("mesh");
        for primitive in mesh.primitives() {
            if let Some(data) = read_primitive(&primitive, name, world, buffers)? {
                out.push(data);
            }
        }
    }

    for child in node.children() {
        visit_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    name: &str,
    world: Mat4,
    buffers: &[Vec<u8>],
) -> Result<Option<MeshData>, OrbitViewError> {
    let mode = primitive.mode();
    if !matches!(mode, Mode::Triangles | Mode::TriangleStrip | Mode::TriangleFan)
    {
        log::debug!("{name}: skipping {mode:?} primitive");
        return Ok(None);
    }

    let reader =
        primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let Some(positions) = reader.read_positions() else {
        log::warn!("{name}: primitive without POSITION, skipped");
        return Ok(None);
    };
    let positions: Vec<[f32; 3]> = positions
        .map(|p| world.transform_point3(Vec3::from(p)).to_array())
        .collect();
    let vertex_count = positions.len();

    let mut uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .map(|coords| coords.into_f32().collect())
        .unwrap_or_default();
    if uvs.len() != vertex_count {
        if !uvs.is_empty() {
            log::warn!(
                "{name}: {} texture coordinates for {vertex_count} vertices",
                uvs.len()
            );
        }
        uvs.resize(vertex_count, [0.0, 0.0]);
    }

    let raw_indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertex_count as u32).collect(),
    };
    if let Some(&bad) = raw_indices.iter().find(|&&i| i as usize >= vertex_count)
    {
        return Err(OrbitViewError::AssetLoad(format!(
            "{name}: index {bad} out of range for {vertex_count} vertices"
        )));
    }
    let indices = triangulate(mode, &raw_indices);
    if indices.is_empty() {
        return Ok(None);
    }

    let base_color = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    Ok(Some(MeshData {
        name: name.to_owned(),
        positions,
        uvs,
        indices,
        base_color,
    }))
}

/// Expand strips and fans into a plain triangle list.
fn triangulate(mode: Mode, indices: &[u32]) -> Vec<u32> {
    match mode {
        Mode::TriangleStrip => indices
            .windows(3)
            .enumerate()
            .flat_map(|(i, w)| {
                if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[1], w[0], w[2]]
                }
            })
            .collect(),
        Mode::TriangleFan => match indices.split_first() {
            Some((&hub, rest)) => rest
                .windows(2)
                .flat_map(|w| [hub, w[0], w[1]])
                .collect(),
            None => Vec::new(),
        },
        _ => {
            let whole = indices.len() - indices.len() % 3;
            indices[..whole].to_vec()
        }
    }
}
