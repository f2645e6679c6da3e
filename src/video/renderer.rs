use std::rc::Rc;

use super::buffer::IndexBuffer;
use super::device::Device;
use super::shader::Shader;
use super::types::ClearFlags;
use super::vertex_array::VertexArray;

/// Issues indexed draws. Every draw binds the vertex array, the index buffer and the
/// program it uses, whatever was bound before.
pub struct Renderer {
    device: Rc<Device>,
}

impl Renderer {
    pub fn new(device: &Rc<Device>) -> Self {
        Renderer {
            device: device.clone(),
        }
    }

    #[inline]
    pub fn device(&self) -> &Rc<Device> {
        &self.device
    }

    /// Draws `ib.count()` indices as triangles. Returns `false` if the device rejected
    /// the draw, the error itself is logged.
    pub fn draw(&self, va: &VertexArray, ib: &IndexBuffer, shader: &Shader) -> bool {
        Renderer::prepare(va, ib, shader);
        gl_check!(self.device, draw_elements(ib.count(), ib.format()))
    }

    /// Draws `instances` copies of the indexed geometry. Drawing zero instances
    /// issues nothing.
    pub fn draw_instanced(
        &self,
        va: &VertexArray,
        ib: &IndexBuffer,
        shader: &Shader,
        instances: u32,
    ) -> bool {
        if instances == 0 {
            return true;
        }

        Renderer::prepare(va, ib, shader);
        gl_check!(
            self.device,
            draw_elements_instanced(ib.count(), ib.format(), instances)
        )
    }

    fn prepare(va: &VertexArray, ib: &IndexBuffer, shader: &Shader) {
        shader.bind();
        va.bind();
        ib.bind();
    }

    pub fn set_clear_color(&self, color: [f32; 4]) {
        self.device.set_clear_color(color);
    }

    /// Clears the color buffer.
    pub fn clear(&self) {
        self.clear_with(ClearFlags::COLOR);
    }

    pub fn clear_with(&self, flags: ClearFlags) {
        if !flags.is_empty() {
            gl_call!(self.device, clear(flags));
        }
    }
}
