use glsandbox::cgmath::{self, Deg, Matrix4, Vector3};
use glsandbox::prelude::*;

use super::mesh::{quad_indices, Mesh};
use super::Viewport;

/// Two textured quads in pixel coordinates. The first one can be moved, rotated and
/// scaled, while the tint of both pulses over time.
pub struct Texture2D {
    viewport: Viewport,
    renderer: Renderer,
    quad: Mesh,
    shader: Shader,
    texture: Texture,

    red: f32,
    increment: f32,
    translation_a: Vector3<f32>,
    translation_b: Vector3<f32>,
    view_translation: Vector3<f32>,
    scale: f32,
    rotation: f32,
}

impl Texture2D {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        #[rustfmt::skip]
        let vertices: [f32; 16] = [
            -150.0, -150.0,  0.0, 0.0,
             150.0, -150.0,  1.0, 0.0,
             150.0,  150.0,  1.0, 1.0,
            -150.0,  150.0,  0.0, 1.0,
        ];

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        let quad = Mesh::new(device, &vertices[..], &layout, &quad_indices(1))?;

        let shader = Shader::from_file(device, ctx.asset("shaders/texture.glsl"))?;
        let texture = Texture::from_file(device, ctx.asset("textures/slime.png"))?;

        shader.bind();
        shader.set_uniform_1i("u_Texture", 0)?;

        device.set_capability(Capability::Blend, true);
        device.set_blend_func(
            BlendFactor::Value(BlendValue::SourceAlpha),
            BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
        );

        Ok(Texture2D {
            viewport,
            renderer: Renderer::new(device),
            quad,
            shader,
            texture,

            red: 0.0,
            increment: 0.5,
            translation_a: Vector3::new(200.0, 200.0, 0.0),
            translation_b: Vector3::new(600.0, 200.0, 0.0),
            view_translation: Vector3::new(0.0, 0.0, 0.0),
            scale: 0.5,
            rotation: 90.0,
        })
    }

    fn model_a(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation_a)
            * Matrix4::from_angle_z(Deg(self.rotation))
            * Matrix4::from_scale(self.scale)
    }
}

impl Scene for Texture2D {
    fn on_update(&mut self, dt: f32) -> Result<()> {
        if self.red > 1.0 {
            self.increment = -self.increment.abs();
        } else if self.red < 0.0 {
            self.increment = self.increment.abs();
        }

        self.red += self.increment * dt;
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let [w, h] = self.viewport.get();
        let projection = cgmath::ortho(0.0, w as f32, 0.0, h as f32, -1.0, 1.0);
        let view = Matrix4::from_translation(self.view_translation);

        self.renderer.set_clear_color([0.1, 0.1, 0.1, 1.0]);
        self.renderer.clear();
        self.texture.bind(0)?;

        self.shader.bind();
        self.shader.set_uniform_4f("u_Color", self.red, 0.3, 0.8, 1.0)?;
        self.shader
            .set_uniform_mat4("u_MVP", &(projection * view * self.model_a()))?;
        self.quad.draw(&self.renderer, &self.shader);

        let model_b = Matrix4::from_translation(self.translation_b);
        self.shader
            .set_uniform_mat4("u_MVP", &(projection * view * model_b))?;
        self.quad.draw(&self.renderer, &self.shader);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        let [w, h] = self.viewport.get();

        ui.text("Model Matrix");
        ui.slider_f32("Translation X", &mut self.translation_a.x, 0.0, w as f32);
        ui.slider_f32("Translation Y", &mut self.translation_a.y, 0.0, h as f32);
        ui.slider_f32("Scale", &mut self.scale, 0.0, 5.0);
        ui.slider_f32("Rotation", &mut self.rotation, -180.0, 180.0);

        ui.text("View Matrix");
        ui.slider_f32("View Translation X", &mut self.view_translation.x, 0.0, w as f32);
        ui.slider_f32("View Translation Y", &mut self.view_translation.y, 0.0, h as f32);
        Ok(())
    }
}
