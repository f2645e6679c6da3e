use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

use gl;
use gl::types::*;

use super::super::Visitor;
use super::capabilities::Capabilities;
use super::types;
use crate::video::errors::Result;
use crate::video::types::*;

pub struct GLVisitor {
    capabilities: Capabilities,
}

impl GLVisitor {
    /// # Safety
    ///
    /// The function pointers of `gl` must be loaded, and their context must be current.
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);
        capabilities.check()?;

        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        Ok(GLVisitor { capabilities })
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

impl Visitor for GLVisitor {
    unsafe fn get_error(&mut self) -> u32 {
        gl::GetError()
    }

    unsafe fn description(&mut self) -> String {
        format!(
            "{:?} {} ({})",
            self.capabilities.version, self.capabilities.renderer, self.capabilities.vendor
        )
    }

    unsafe fn create_buffer(&mut self) -> u32 {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        id
    }

    unsafe fn bind_buffer(&mut self, target: BufferTarget, id: u32) {
        gl::BindBuffer(target.into(), id);
    }

    unsafe fn buffer_data(
        &mut self,
        target: BufferTarget,
        size: usize,
        data: Option<&[u8]>,
        hint: BufferHint,
    ) {
        let value = match data {
            Some(v) if !v.is_empty() => v.as_ptr() as *const c_void,
            _ => ptr::null(),
        };

        gl::BufferData(target.into(), size as GLsizeiptr, value, hint.into());
    }

    unsafe fn buffer_sub_data(&mut self, target: BufferTarget, offset: usize, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        gl::BufferSubData(
            target.into(),
            offset as GLintptr,
            data.len() as GLsizeiptr,
            data.as_ptr() as *const c_void,
        );
    }

    unsafe fn delete_buffer(&mut self, id: u32) {
        gl::DeleteBuffers(1, &id);
    }

    unsafe fn create_vertex_array(&mut self) -> u32 {
        let mut id = 0;
        gl::GenVertexArrays(1, &mut id);
        id
    }

    unsafe fn bind_vertex_array(&mut self, id: u32) {
        gl::BindVertexArray(id);
    }

    unsafe fn delete_vertex_array(&mut self, id: u32) {
        gl::DeleteVertexArrays(1, &id);
    }

    unsafe fn enable_vertex_attribute(&mut self, index: u32) {
        gl::EnableVertexAttribArray(index);
    }

    unsafe fn vertex_attribute_pointer(&mut self, index: u32, pointer: AttributePointer) {
        gl::VertexAttribPointer(
            index,
            pointer.size as GLint,
            pointer.format.into(),
            if pointer.normalized { gl::TRUE } else { gl::FALSE },
            pointer.stride as GLsizei,
            pointer.offset as usize as *const c_void,
        );
    }

    unsafe fn vertex_attribute_divisor(&mut self, index: u32, divisor: u32) {
        gl::VertexAttribDivisor(index, divisor);
    }

    unsafe fn create_texture(&mut self) -> u32 {
        let mut id = 0;
        gl::GenTextures(1, &mut id);
        id
    }

    unsafe fn active_texture(&mut self, slot: u32) {
        gl::ActiveTexture(gl::TEXTURE0 + slot);
    }

    unsafe fn bind_texture(&mut self, target: TextureTarget, id: u32) {
        gl::BindTexture(target.into(), id);
    }

    unsafe fn texture_parameters(
        &mut self,
        target: TextureTarget,
        wrap: TextureWrap,
        filter: TextureFilter,
    ) {
        let target: GLenum = target.into();
        let wrap: GLenum = wrap.into();
        let filter: GLenum = filter.into();

        gl::TexParameteri(target, gl::TEXTURE_MIN_FILTER, filter as GLint);
        gl::TexParameteri(target, gl::TEXTURE_MAG_FILTER, filter as GLint);
        gl::TexParameteri(target, gl::TEXTURE_WRAP_S, wrap as GLint);
        gl::TexParameteri(target, gl::TEXTURE_WRAP_T, wrap as GLint);

        if target == gl::TEXTURE_CUBE_MAP {
            gl::TexParameteri(target, gl::TEXTURE_WRAP_R, wrap as GLint);
        }
    }

    unsafe fn texture_image(
        &mut self,
        target: ImageTarget,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    ) {
        let value = match pixels {
            Some(v) if !v.is_empty() => v.as_ptr() as *const c_void,
            _ => ptr::null(),
        };

        gl::TexImage2D(
            target.into(),
            0,
            gl::RGBA8 as GLint,
            width as GLsizei,
            height as GLsizei,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            value,
        );
    }

    unsafe fn delete_texture(&mut self, id: u32) {
        gl::DeleteTextures(1, &id);
    }

    unsafe fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        gl::CreateShader(stage.into())
    }

    unsafe fn compile_shader(&mut self, id: u32, source: &str) -> bool {
        // Interior nul bytes can not be represented, report them as a failed compilation.
        let c_str = match CString::new(source.as_bytes()) {
            Ok(v) => v,
            Err(_) => return false,
        };

        gl::ShaderSource(id, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(id);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
        status == GLint::from(gl::TRUE)
    }

    unsafe fn shader_info_log(&mut self, id: u32) -> String {
        let mut len = 0;
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
        if len <= 0 {
            return String::new();
        }

        let mut buf = vec![0u8; len as usize];
        gl::GetShaderInfoLog(id, len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);
        info_log(buf)
    }

    unsafe fn delete_shader(&mut self, id: u32) {
        gl::DeleteShader(id);
    }

    unsafe fn create_program(&mut self) -> u32 {
        gl::CreateProgram()
    }

    unsafe fn attach_shader(&mut self, program: u32, shader: u32) {
        gl::AttachShader(program, shader);
    }

    unsafe fn detach_shader(&mut self, program: u32, shader: u32) {
        gl::DetachShader(program, shader);
    }

    unsafe fn link_program(&mut self, program: u32) -> bool {
        gl::LinkProgram(program);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        status == GLint::from(gl::TRUE)
    }

    unsafe fn validate_program(&mut self, program: u32) -> bool {
        gl::ValidateProgram(program);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status);
        status == GLint::from(gl::TRUE)
    }

    unsafe fn program_info_log(&mut self, program: u32) -> String {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        if len <= 0 {
            return String::new();
        }

        let mut buf = vec![0u8; len as usize];
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);
        info_log(buf)
    }

    unsafe fn use_program(&mut self, program: u32) {
        gl::UseProgram(program);
    }

    unsafe fn delete_program(&mut self, program: u32) {
        gl::DeleteProgram(program);
    }

    unsafe fn uniform_location(&mut self, program: u32, name: &str) -> i32 {
        match CString::new(name.as_bytes()) {
            Ok(c_name) => gl::GetUniformLocation(program, c_name.as_ptr()),
            Err(_) => -1,
        }
    }

    unsafe fn uniform(&mut self, location: i32, variable: &UniformVariable) {
        match *variable {
            UniformVariable::I32(v) => gl::Uniform1i(location, v),
            UniformVariable::F32(v) => gl::Uniform1f(location, v),
            UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
            UniformVariable::Vector3f(v) => gl::Uniform3f(location, v[0], v[1], v[2]),
            UniformVariable::Vector4f(v) => gl::Uniform4f(location, v[0], v[1], v[2], v[3]),
            UniformVariable::Matrix4f(v) => {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, v[0].as_ptr())
            }
            UniformVariable::I32Array(ref v) => {
                gl::Uniform1iv(location, v.len() as GLsizei, v.as_ptr())
            }
        }
    }

    unsafe fn create_framebuffer(&mut self) -> u32 {
        let mut id = 0;
        gl::GenFramebuffers(1, &mut id);
        id
    }

    unsafe fn bind_framebuffer(&mut self, id: u32) {
        gl::BindFramebuffer(gl::FRAMEBUFFER, id);
    }

    unsafe fn framebuffer_texture(&mut self, attachment: Attachment, texture: u32) {
        gl::FramebufferTexture2D(
            gl::FRAMEBUFFER,
            attachment.into(),
            gl::TEXTURE_2D,
            texture,
            0,
        );
    }

    unsafe fn framebuffer_renderbuffer(&mut self, attachment: Attachment, renderbuffer: u32) {
        gl::FramebufferRenderbuffer(
            gl::FRAMEBUFFER,
            attachment.into(),
            gl::RENDERBUFFER,
            renderbuffer,
        );
    }

    unsafe fn framebuffer_status(&mut self) -> FramebufferStatus {
        types::framebuffer_status(gl::CheckFramebufferStatus(gl::FRAMEBUFFER))
    }

    unsafe fn delete_framebuffer(&mut self, id: u32) {
        gl::DeleteFramebuffers(1, &id);
    }

    unsafe fn create_renderbuffer(&mut self, width: u32, height: u32) -> u32 {
        let mut id = 0;
        gl::GenRenderbuffers(1, &mut id);
        gl::BindRenderbuffer(gl::RENDERBUFFER, id);
        gl::RenderbufferStorage(
            gl::RENDERBUFFER,
            gl::DEPTH24_STENCIL8,
            width as GLsizei,
            height as GLsizei,
        );
        gl::BindRenderbuffer(gl::RENDERBUFFER, 0);
        id
    }

    unsafe fn delete_renderbuffer(&mut self, id: u32) {
        gl::DeleteRenderbuffers(1, &id);
    }

    unsafe fn set_capability(&mut self, capability: Capability, enable: bool) {
        if enable {
            gl::Enable(capability.into());
        } else {
            gl::Disable(capability.into());
        }
    }

    unsafe fn depth_func(&mut self, comparison: Comparison) {
        gl::DepthFunc(comparison.into());
    }

    unsafe fn depth_mask(&mut self, write: bool) {
        gl::DepthMask(if write { gl::TRUE } else { gl::FALSE });
    }

    unsafe fn stencil_func(&mut self, comparison: Comparison, reference: i32, mask: u32) {
        gl::StencilFunc(comparison.into(), reference, mask);
    }

    unsafe fn stencil_op(&mut self, fail: StencilAction, zfail: StencilAction, pass: StencilAction) {
        gl::StencilOp(fail.into(), zfail.into(), pass.into());
    }

    unsafe fn stencil_mask(&mut self, mask: u32) {
        gl::StencilMask(mask);
    }

    unsafe fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        gl::BlendFunc(src.into(), dst.into());
    }

    unsafe fn polygon_mode(&mut self, mode: PolygonMode) {
        gl::PolygonMode(gl::FRONT_AND_BACK, mode.into());
    }

    unsafe fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        gl::Viewport(x, y, width as GLsizei, height as GLsizei);
    }

    unsafe fn clear_color(&mut self, color: [f32; 4]) {
        gl::ClearColor(color[0], color[1], color[2], color[3]);
    }

    unsafe fn clear(&mut self, flags: ClearFlags) {
        let bits: GLbitfield = flags.into();
        if bits != 0 {
            gl::Clear(bits);
        }
    }

    unsafe fn draw_elements(&mut self, count: u32, format: IndexFormat) {
        gl::DrawElements(
            gl::TRIANGLES,
            count as GLsizei,
            format.into(),
            ptr::null(),
        );
    }

    unsafe fn draw_elements_instanced(&mut self, count: u32, format: IndexFormat, instances: u32) {
        gl::DrawElementsInstanced(
            gl::TRIANGLES,
            count as GLsizei,
            format.into(),
            ptr::null(),
            instances as GLsizei,
        );
    }
}

fn info_log(mut buf: Vec<u8>) -> String {
    // Skips the trailing null character.
    while buf.last() == Some(&0) {
        buf.pop();
    }

    String::from_utf8_lossy(&buf).into_owned()
}
