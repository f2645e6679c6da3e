use std::rc::Rc;

use bytemuck::Pod;
use glsandbox::prelude::*;

/// Indexed geometry with the buffers it reads from.
pub struct Mesh {
    pub vertex_array: VertexArray,
    pub indices: IndexBuffer,
    _vertices: VertexBuffer,
}

impl Mesh {
    pub fn new<T: Pod>(
        device: &Rc<Device>,
        vertices: &[T],
        layout: &VertexBufferLayout,
        indices: &[u32],
    ) -> Result<Self> {
        let vertex_array = VertexArray::new(device);
        let vertex_buffer = VertexBuffer::from_slice(device, vertices)?;
        vertex_array.add_buffer(&vertex_buffer, layout)?;
        let indices = IndexBuffer::new(device, indices)?;

        Ok(Mesh {
            vertex_array,
            indices,
            _vertices: vertex_buffer,
        })
    }

    /// A unit cube centered at the origin with positions, normals and texture
    /// coordinates.
    pub fn cube(device: &Rc<Device>) -> Result<Self> {
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(3).push::<f32>(3).push::<f32>(2);
        Mesh::new(device, &CUBE_VERTICES[..], &layout, &quad_indices(6))
    }

    /// A flat square on the `y = 0` plane, `2 * extent` wide, with the same layout
    /// as `cube`. Texture coordinates repeat once per unit.
    pub fn plane(device: &Rc<Device>, extent: f32) -> Result<Self> {
        let (e, t) = (extent, extent * 2.0);
        #[rustfmt::skip]
        let vertices = [
             e, 0.0,  e,  0.0, 1.0, 0.0,  t,   0.0,
             e, 0.0, -e,  0.0, 1.0, 0.0,  t,   t,
            -e, 0.0, -e,  0.0, 1.0, 0.0,  0.0, t,
            -e, 0.0,  e,  0.0, 1.0, 0.0,  0.0, 0.0,
        ];

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(3).push::<f32>(3).push::<f32>(2);
        Mesh::new(device, &vertices[..], &layout, &quad_indices(1))
    }

    /// A quad covering the whole clip space, with 2D positions and texture coordinates.
    pub fn screen_quad(device: &Rc<Device>) -> Result<Self> {
        #[rustfmt::skip]
        let vertices: [f32; 16] = [
            -1.0, -1.0,  0.0, 0.0,
             1.0, -1.0,  1.0, 0.0,
             1.0,  1.0,  1.0, 1.0,
            -1.0,  1.0,  0.0, 1.0,
        ];

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        Mesh::new(device, &vertices[..], &layout, &quad_indices(1))
    }

    pub fn draw(&self, renderer: &Renderer, shader: &Shader) -> bool {
        renderer.draw(&self.vertex_array, &self.indices, shader)
    }
}

/// Indices of `count` quads whose four corners are stored one after another,
/// counter-clockwise.
pub fn quad_indices(count: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(count as usize * 6);
    for i in 0..count {
        let v = i * 4;
        indices.extend_from_slice(&[v, v + 1, v + 2, v + 2, v + 3, v]);
    }

    indices
}

#[rustfmt::skip]
const CUBE_VERTICES: [f32; 24 * 8] = [
    // Front
    -0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   0.0, 0.0,
     0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   1.0, 0.0,
     0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   1.0, 1.0,
    -0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   0.0, 1.0,
    // Back
     0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   0.0, 0.0,
    -0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   1.0, 0.0,
    -0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   1.0, 1.0,
     0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   0.0, 1.0,
    // Left
    -0.5, -0.5, -0.5,  -1.0,  0.0,  0.0,   0.0, 0.0,
    -0.5, -0.5,  0.5,  -1.0,  0.0,  0.0,   1.0, 0.0,
    -0.5,  0.5,  0.5,  -1.0,  0.0,  0.0,   1.0, 1.0,
    -0.5,  0.5, -0.5,  -1.0,  0.0,  0.0,   0.0, 1.0,
    // Right
     0.5, -0.5,  0.5,   1.0,  0.0,  0.0,   0.0, 0.0,
     0.5, -0.5, -0.5,   1.0,  0.0,  0.0,   1.0, 0.0,
     0.5,  0.5, -0.5,   1.0,  0.0,  0.0,   1.0, 1.0,
     0.5,  0.5,  0.5,   1.0,  0.0,  0.0,   0.0, 1.0,
    // Top
    -0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   0.0, 0.0,
     0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   1.0, 0.0,
     0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   1.0, 1.0,
    -0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   0.0, 1.0,
    // Bottom
    -0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   0.0, 0.0,
     0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   1.0, 0.0,
     0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   1.0, 1.0,
    -0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   0.0, 1.0,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn indices() {
        assert_eq!(quad_indices(2), vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn cube() {
        let device = Device::headless();
        let mesh = Mesh::cube(&device).unwrap();
        assert_eq!(mesh.indices.count(), 36);
        assert_eq!(mesh.vertex_array.slots(), 3);
    }
}
