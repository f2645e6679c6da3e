//! The backend of the video module, which should be responsible for only one thing:
//! forwarding raw device calls to the low-level OpenGL APIs.
//!
//! A visitor does not track ownership nor validate arguments, it mirrors the device
//! one call at a time. Errors are reported the way the device reports them, through
//! `Visitor::get_error`.

pub mod headless;

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;

use super::errors::Result;
use super::types::*;

pub trait Visitor {
    /// Pops the oldest pending error flag, or `error_code::NO_ERROR`.
    unsafe fn get_error(&mut self) -> u32;

    /// Human readable description of the device.
    unsafe fn description(&mut self) -> String;

    unsafe fn create_buffer(&mut self) -> u32;
    unsafe fn bind_buffer(&mut self, target: BufferTarget, id: u32);
    unsafe fn buffer_data(
        &mut self,
        target: BufferTarget,
        size: usize,
        data: Option<&[u8]>,
        hint: BufferHint,
    );
    unsafe fn buffer_sub_data(&mut self, target: BufferTarget, offset: usize, data: &[u8]);
    unsafe fn delete_buffer(&mut self, id: u32);

    unsafe fn create_vertex_array(&mut self) -> u32;
    unsafe fn bind_vertex_array(&mut self, id: u32);
    unsafe fn delete_vertex_array(&mut self, id: u32);
    unsafe fn enable_vertex_attribute(&mut self, index: u32);
    unsafe fn vertex_attribute_pointer(&mut self, index: u32, pointer: AttributePointer);
    unsafe fn vertex_attribute_divisor(&mut self, index: u32, divisor: u32);

    unsafe fn create_texture(&mut self) -> u32;
    unsafe fn active_texture(&mut self, slot: u32);
    unsafe fn bind_texture(&mut self, target: TextureTarget, id: u32);
    unsafe fn texture_parameters(
        &mut self,
        target: TextureTarget,
        wrap: TextureWrap,
        filter: TextureFilter,
    );
    /// Uploads a RGBA8 image. `None` allocates storage only.
    unsafe fn texture_image(
        &mut self,
        target: ImageTarget,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    );
    unsafe fn delete_texture(&mut self, id: u32);

    unsafe fn create_shader(&mut self, stage: ShaderStage) -> u32;
    /// Sets the source of a shader object and compiles it, returns the compile status.
    unsafe fn compile_shader(&mut self, id: u32, source: &str) -> bool;
    unsafe fn shader_info_log(&mut self, id: u32) -> String;
    unsafe fn delete_shader(&mut self, id: u32);

    unsafe fn create_program(&mut self) -> u32;
    unsafe fn attach_shader(&mut self, program: u32, shader: u32);
    unsafe fn detach_shader(&mut self, program: u32, shader: u32);
    unsafe fn link_program(&mut self, program: u32) -> bool;
    unsafe fn validate_program(&mut self, program: u32) -> bool;
    unsafe fn program_info_log(&mut self, program: u32) -> String;
    unsafe fn use_program(&mut self, program: u32);
    unsafe fn delete_program(&mut self, program: u32);
    unsafe fn uniform_location(&mut self, program: u32, name: &str) -> i32;
    unsafe fn uniform(&mut self, location: i32, variable: &UniformVariable);

    unsafe fn create_framebuffer(&mut self) -> u32;
    unsafe fn bind_framebuffer(&mut self, id: u32);
    unsafe fn framebuffer_texture(&mut self, attachment: Attachment, texture: u32);
    unsafe fn framebuffer_renderbuffer(&mut self, attachment: Attachment, renderbuffer: u32);
    unsafe fn framebuffer_status(&mut self) -> FramebufferStatus;
    unsafe fn delete_framebuffer(&mut self, id: u32);
    /// Creates a renderbuffer with depth24/stencil8 storage.
    unsafe fn create_renderbuffer(&mut self, width: u32, height: u32) -> u32;
    unsafe fn delete_renderbuffer(&mut self, id: u32);

    unsafe fn set_capability(&mut self, capability: Capability, enable: bool);
    unsafe fn depth_func(&mut self, comparison: Comparison);
    unsafe fn depth_mask(&mut self, write: bool);
    unsafe fn stencil_func(&mut self, comparison: Comparison, reference: i32, mask: u32);
    unsafe fn stencil_op(&mut self, fail: StencilAction, zfail: StencilAction, pass: StencilAction);
    unsafe fn stencil_mask(&mut self, mask: u32);
    unsafe fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor);
    unsafe fn polygon_mode(&mut self, mode: PolygonMode);
    unsafe fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    unsafe fn clear_color(&mut self, color: [f32; 4]);
    unsafe fn clear(&mut self, flags: ClearFlags);

    /// Draws triangles from the bound element buffer.
    unsafe fn draw_elements(&mut self, count: u32, format: IndexFormat);
    unsafe fn draw_elements_instanced(&mut self, count: u32, format: IndexFormat, instances: u32);
}

/// Creates the OpenGL visitor.
///
/// # Safety
///
/// The OpenGL function pointers must have been loaded, and the context they belong
/// to must be current on this thread.
#[cfg(not(target_arch = "wasm32"))]
pub unsafe fn new() -> Result<Box<dyn Visitor>> {
    let visitor = self::gl::visitor::GLVisitor::new()?;
    Ok(Box::new(visitor))
}

pub fn new_headless() -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new())
}
