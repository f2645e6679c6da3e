//! Vertex format and view controls shared by the batch rendering scenes.

use bytemuck::{Pod, Zeroable};
use glsandbox::cgmath::{self, Deg, Matrix4, Vector3};
use glsandbox::prelude::*;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    /// Index into the sampler array.
    pub texture: f32,
}

pub fn layout() -> VertexBufferLayout {
    let mut layout = VertexBufferLayout::new();
    layout
        .push::<f32>(3)
        .push::<f32>(2)
        .push::<f32>(4)
        .push::<f32>(1);
    layout
}

/// Appends the four corners of an axis-aligned quad, counter-clockwise from the
/// bottom-left one.
pub fn push_quad(vertices: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, texture: f32) {
    let corners = [
        ([x, y], [0.0, 0.0], [1.0, 0.0, 0.0, 1.0]),
        ([x + w, y], [1.0, 0.0], [0.0, 1.0, 0.0, 1.0]),
        ([x + w, y + h], [1.0, 1.0], [0.0, 0.0, 1.0, 1.0]),
        ([x, y + h], [0.0, 1.0], [0.3, 0.3, 0.3, 1.0]),
    ];

    for &(p, uv, color) in &corners {
        vertices.push(Vertex {
            position: [p[0], p[1], 0.0],
            uv,
            color,
            texture,
        });
    }
}

/// Model, view and projection parameters editable from the UI.
#[derive(Debug, Clone)]
pub struct BatchView {
    pub scale: f32,
    pub fov: f32,
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
}

impl BatchView {
    pub fn new(scale: f32, translation: Vector3<f32>) -> Self {
        BatchView {
            scale,
            fov: 45.0,
            translation,
            rotation: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn mvp(&self, aspect: f32) -> Matrix4<f32> {
        let projection = cgmath::perspective(Deg(self.fov), aspect, 0.1, 100.0);
        let view = Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z));

        projection * view * Matrix4::from_scale(self.scale)
    }

    pub fn on_ui(&mut self, ui: &mut dyn Ui) {
        ui.slider_f32("Scale", &mut self.scale, 0.0, 5.0);

        ui.text("View Matrix");
        ui.slider_f32("View Translation X", &mut self.translation.x, -1.0, 1.0);
        ui.slider_f32("View Translation Y", &mut self.translation.y, -1.0, 1.0);
        ui.slider_f32("View Translation Z", &mut self.translation.z, -5.0, 0.0);
        ui.slider_f32("View Rotation X", &mut self.rotation.x, 0.0, 90.0);
        ui.slider_f32("View Rotation Y", &mut self.rotation.y, 0.0, 90.0);
        ui.slider_f32("View Rotation Z", &mut self.rotation.z, 0.0, 90.0);

        ui.text("Projection Matrix");
        ui.slider_f32("Field of View", &mut self.fov, 10.0, 120.0);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::mem;

    #[test]
    fn layout_matches_vertex() {
        assert_eq!(layout().stride() as usize, mem::size_of::<Vertex>());
        assert_eq!(layout().elements().len(), 4);
    }

    #[test]
    fn quad_corners() {
        let mut vertices = Vec::new();
        push_quad(&mut vertices, 1.0, 2.0, 0.5, 0.25, 1.0);

        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].position, [1.0, 2.0, 0.0]);
        assert_eq!(vertices[2].position, [1.5, 2.25, 0.0]);
        assert!(vertices.iter().all(|v| v.texture == 1.0));
    }
}
