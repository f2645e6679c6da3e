use glsandbox::cgmath::{self, Deg, Matrix4, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;

#[rustfmt::skip]
const VERTICES: [f32; 8 * 7] = [
    -0.5, -0.5, -0.5,   1.0, 0.0, 0.0, 1.0,
    -0.5,  0.5, -0.5,   0.0, 1.0, 0.0, 1.0,
     0.5,  0.5, -0.5,   0.0, 0.0, 1.0, 1.0,
     0.5, -0.5, -0.5,   0.0, 1.0, 0.0, 1.0,
    -0.5, -0.5,  0.5,   1.0, 0.0, 0.0, 1.0,
    -0.5,  0.5,  0.5,   0.0, 1.0, 0.0, 1.0,
     0.5,  0.5,  0.5,   0.0, 0.0, 1.0, 1.0,
     0.5, -0.5,  0.5,   0.0, 1.0, 0.0, 1.0,
];

/// Corners are shared between faces, so colors blend across the edges.
#[rustfmt::skip]
const INDICES: [u32; 36] = [
    0, 1, 2,  2, 3, 0,
    4, 5, 6,  6, 7, 4,
    0, 1, 5,  5, 4, 0,
    3, 2, 6,  6, 7, 3,
    1, 5, 6,  6, 2, 1,
    0, 4, 7,  7, 3, 0,
];

/// A cube with per-corner colors and a depth buffer, placed with model and view
/// sliders.
pub struct Cube3D {
    viewport: Viewport,
    renderer: Renderer,
    cube: Mesh,
    shader: Shader,

    translation: Vector3<f32>,
    view_translation: Vector3<f32>,
    scale: f32,
    rotation: f32,
}

impl Cube3D {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(3).push::<f32>(4);
        let cube = Mesh::new(device, &VERTICES[..], &layout, &INDICES[..])?;
        let shader = Shader::from_file(device, ctx.asset("shaders/colored.glsl"))?;

        device.set_capability(Capability::DepthTest, true);

        Ok(Cube3D {
            viewport,
            renderer: Renderer::new(device),
            cube,
            shader,

            translation: Vector3::new(0.0, 0.0, 0.0),
            view_translation: Vector3::new(0.0, 0.0, -3.0),
            scale: 1.0,
            rotation: 30.0,
        })
    }
}

impl Scene for Cube3D {
    fn on_render(&mut self) -> Result<()> {
        let projection = cgmath::perspective(Deg(45.0), self.viewport.aspect(), 0.1, 100.0);
        let view = Matrix4::from_translation(self.view_translation);
        let model = Matrix4::from_translation(self.translation)
            * Matrix4::from_axis_angle(Vector3::new(0.6, 0.8, 0.0), Deg(self.rotation))
            * Matrix4::from_scale(self.scale);

        self.renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);

        self.shader.bind();
        self.shader
            .set_uniform_mat4("u_MVP", &(projection * view * model))?;
        self.cube.draw(&self.renderer, &self.shader);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text("Model Matrix");
        ui.slider_f32("Translation X", &mut self.translation.x, -1.0, 1.0);
        ui.slider_f32("Translation Y", &mut self.translation.y, -1.0, 1.0);
        ui.slider_f32("Translation Z", &mut self.translation.z, -1.0, 1.0);
        ui.slider_f32("Scale", &mut self.scale, 0.0, 5.0);
        ui.slider_f32("Rotation", &mut self.rotation, -180.0, 180.0);

        ui.text("View Matrix");
        ui.slider_f32("View Translation X", &mut self.view_translation.x, -1.0, 1.0);
        ui.slider_f32("View Translation Y", &mut self.view_translation.y, -1.0, 1.0);
        ui.slider_f32("View Translation Z", &mut self.view_translation.z, -10.0, -1.0);
        Ok(())
    }
}
