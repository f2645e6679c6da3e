use glsandbox::cgmath::Vector3;
use glsandbox::prelude::*;

use super::batch::{self, push_quad, BatchView, Vertex};
use super::mesh::quad_indices;
use super::Viewport;

const MAX_QUADS: usize = 1000;
const MAX_VERTICES: usize = MAX_QUADS * 4;

/// Draws a grid of quads plus one movable quad in a single draw call. The geometry
/// is rebuilt every frame and streamed into a dynamic vertex buffer, and each quad
/// picks one of two textures through a sampler array.
pub struct DynamicBatch {
    viewport: Viewport,
    renderer: Renderer,
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    indices: IndexBuffer,
    shader: Shader,
    textures: [Texture; 2],
    vertices: Vec<Vertex>,
    uploaded: usize,

    columns: f32,
    quad: [f32; 2],
    tint: f32,
    view: BatchView,
}

impl DynamicBatch {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        // Quads past the ones written each frame stay zeroed, which makes them
        // degenerate.
        let zeroes = vec![Vertex::default(); MAX_VERTICES];
        let bytes: &[u8] = bytemuck::cast_slice(&zeroes);
        let vertex_buffer = VertexBuffer::new(device, Some(bytes), bytes.len(), BufferHint::Dynamic)?;

        let vertex_array = VertexArray::new(device);
        vertex_array.add_buffer(&vertex_buffer, &batch::layout())?;
        let indices = IndexBuffer::new(device, &quad_indices(MAX_QUADS as u32))?;

        let shader = Shader::from_file(device, ctx.asset("shaders/batch.glsl"))?;
        let textures = [
            Texture::from_file(device, ctx.asset("textures/slime.png"))?,
            Texture::from_file(device, ctx.asset("textures/bricks.png"))?,
        ];

        shader.bind();
        shader.set_uniform_1iv("u_Textures", &[0, 1])?;

        Ok(DynamicBatch {
            viewport,
            renderer: Renderer::new(device),
            vertex_array,
            vertex_buffer,
            indices,
            shader,
            textures,
            vertices: Vec::with_capacity(MAX_VERTICES),
            uploaded: 0,

            columns: 5.0,
            quad: [0.1, 0.1],
            tint: 0.3,
            view: BatchView::new(0.2, Vector3::new(-0.5, -0.5, -1.5)),
        })
    }
}

impl Scene for DynamicBatch {
    fn on_update(&mut self, _: f32) -> Result<()> {
        self.vertices.clear();

        let n = self.columns as usize;
        for y in 0..n {
            for x in 0..n {
                push_quad(&mut self.vertices, x as f32, y as f32, 0.8, 0.5, 1.0);
            }
        }

        push_quad(&mut self.vertices, self.quad[0], self.quad[1], 0.5, 0.5, 0.0);

        // Zeroes the quads left over from a larger grid of the last frame.
        let written = self.vertices.len();
        if written < self.uploaded {
            self.vertices.resize(self.uploaded, Vertex::default());
        }

        self.vertex_buffer.update_slice(0, &self.vertices)?;
        self.uploaded = written;
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let mvp = self.view.mvp(self.viewport.aspect());

        self.renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        self.renderer.clear();

        for (slot, texture) in self.textures.iter().enumerate() {
            texture.bind(slot as u32)?;
        }

        self.shader.bind();
        self.shader.set_uniform_1f("u_Tint", self.tint)?;
        self.shader.set_uniform_mat4("u_MVP", &mvp)?;
        self.renderer
            .draw(&self.vertex_array, &self.indices, &self.shader);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text("Geometry");
        ui.slider_f32("Columns", &mut self.columns, 1.0, 30.0);
        ui.slider_f32("Quad X", &mut self.quad[0], -1.0, 1.0);
        ui.slider_f32("Quad Y", &mut self.quad[1], -1.0, 1.0);
        ui.slider_f32("Vertex Color", &mut self.tint, 0.0, 1.0);
        self.view.on_ui(ui);
        Ok(())
    }
}
