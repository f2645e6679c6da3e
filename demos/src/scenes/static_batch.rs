use glsandbox::cgmath::Vector3;
use glsandbox::prelude::*;

use super::batch::{self, push_quad, BatchView};
use super::mesh::{quad_indices, Mesh};
use super::Viewport;

/// Two quads with different textures, both stored in one static vertex buffer and
/// drawn with a single call.
pub struct StaticBatch {
    viewport: Viewport,
    renderer: Renderer,
    quads: Mesh,
    shader: Shader,
    textures: [Texture; 2],

    tint: f32,
    view: BatchView,
}

impl StaticBatch {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        let mut vertices = Vec::with_capacity(8);
        push_quad(&mut vertices, 0.1, 0.1, 0.5, 0.3, 0.0);
        push_quad(&mut vertices, 0.6, 0.1, 0.5, 0.3, 1.0);
        let quads = Mesh::new(device, &vertices, &batch::layout(), &quad_indices(2))?;

        let shader = Shader::from_file(device, ctx.asset("shaders/batch.glsl"))?;
        shader.bind();
        shader.set_uniform_1iv("u_Textures", &[0, 1])?;

        Ok(StaticBatch {
            viewport,
            renderer: Renderer::new(device),
            quads,
            shader,
            textures: [
                Texture::from_file(device, ctx.asset("textures/slime.png"))?,
                Texture::from_file(device, ctx.asset("textures/bricks.png"))?,
            ],

            tint: 0.2,
            view: BatchView::new(1.0, Vector3::new(-0.6, -0.25, -1.5)),
        })
    }
}

impl Scene for StaticBatch {
    fn on_render(&mut self) -> Result<()> {
        self.renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        self.renderer.clear();

        for (slot, texture) in self.textures.iter().enumerate() {
            texture.bind(slot as u32)?;
        }

        self.shader.bind();
        self.shader.set_uniform_1f("u_Tint", self.tint)?;
        self.shader
            .set_uniform_mat4("u_MVP", &self.view.mvp(self.viewport.aspect()))?;
        self.quads.draw(&self.renderer, &self.shader);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text("Model Matrix");
        ui.slider_f32("Vertex Color", &mut self.tint, 0.0, 1.0);
        self.view.on_ui(ui);
        Ok(())
    }
}
