use glsandbox::cgmath::{self, Deg, Matrix4, Rad, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;

/// A textured cube tumbling around a tilted axis.
pub struct TexturedCube {
    viewport: Viewport,
    renderer: Renderer,
    cube: Mesh,
    shader: Shader,
    texture: Texture,

    elapsed: f32,
    speed: f32,
    translation: Vector3<f32>,
    view_translation: Vector3<f32>,
    scale: f32,
}

impl TexturedCube {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        let shader = Shader::from_file(device, ctx.asset("shaders/textured.glsl"))?;
        shader.bind();
        shader.set_uniform_1i("u_Texture", 0)?;

        device.set_capability(Capability::DepthTest, true);

        Ok(TexturedCube {
            viewport,
            renderer: Renderer::new(device),
            cube: Mesh::cube(device)?,
            shader,
            texture: Texture::from_file(device, ctx.asset("textures/crate.png"))?,

            elapsed: 0.0,
            speed: 1.0,
            translation: Vector3::new(0.0, 0.0, 0.0),
            view_translation: Vector3::new(0.0, 0.0, -3.0),
            scale: 1.0,
        })
    }
}

impl Scene for TexturedCube {
    fn on_update(&mut self, dt: f32) -> Result<()> {
        self.elapsed += dt * self.speed;
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let projection = cgmath::perspective(Deg(45.0), self.viewport.aspect(), 0.1, 100.0);
        let view = Matrix4::from_translation(self.view_translation);
        let axis = Vector3::new(0.5f32, 1.0, 0.0) / 1.25f32.sqrt();
        let model = Matrix4::from_translation(self.translation)
            * Matrix4::from_axis_angle(axis, Rad(self.elapsed))
            * Matrix4::from_scale(self.scale);

        self.renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);
        self.texture.bind(0)?;

        self.shader.bind();
        self.shader.set_uniform_mat4("u_Projection", &projection)?;
        self.shader.set_uniform_mat4("u_View", &view)?;
        self.shader.set_uniform_mat4("u_Model", &model)?;
        self.cube.draw(&self.renderer, &self.shader);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text("Model Matrix");
        ui.slider_f32("Translation X", &mut self.translation.x, -1.0, 1.0);
        ui.slider_f32("Translation Y", &mut self.translation.y, -1.0, 1.0);
        ui.slider_f32("Translation Z", &mut self.translation.z, -1.0, 1.0);
        ui.slider_f32("Scale", &mut self.scale, 0.0, 5.0);
        ui.slider_f32("Spin Speed", &mut self.speed, -5.0, 5.0);

        ui.text("View Matrix");
        ui.slider_f32("View Translation X", &mut self.view_translation.x, -1.0, 1.0);
        ui.slider_f32("View Translation Y", &mut self.view_translation.y, -1.0, 1.0);
        ui.slider_f32("View Translation Z", &mut self.view_translation.z, -10.0, -1.0);
        Ok(())
    }
}
