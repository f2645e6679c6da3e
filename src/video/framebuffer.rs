use std::rc::Rc;

use super::device::Device;
use super::errors::{Error, Result};
use super::texture::{Texture, TextureParams};
use super::types::{Attachment, FramebufferStatus, TextureFilter, TextureWrap};

/// An off-screen render target with a RGBA8 color texture and a depth24/stencil8
/// renderbuffer.
pub struct Framebuffer {
    device: Rc<Device>,
    id: u32,
    color: Texture,
    depth_stencil: u32,
}

impl Framebuffer {
    pub fn new(device: &Rc<Device>, width: u32, height: u32) -> Result<Self> {
        let params = TextureParams {
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
        };

        let color = Texture::empty(device, width, height, params);
        let depth_stencil = gl_call!(device, create_renderbuffer(width, height));
        let id = gl_call!(device, create_framebuffer());

        let fbo = Framebuffer {
            device: device.clone(),
            id,
            color,
            depth_stencil,
        };

        fbo.bind();
        gl_call!(device, framebuffer_texture(Attachment::Color0, fbo.color.id()));
        gl_call!(
            device,
            framebuffer_renderbuffer(Attachment::DepthStencil, depth_stencil)
        );

        let status = gl_call!(device, framebuffer_status());
        fbo.unbind();

        if status != FramebufferStatus::Complete {
            return Err(Error::FramebufferIncomplete(format!("{:?}", status)));
        }

        Ok(fbo)
    }

    /// Redirects rendering into this framebuffer.
    pub fn bind(&self) {
        self.device.bind_framebuffer(self.id);
    }

    /// Restores the default framebuffer.
    pub fn unbind(&self) {
        self.device.bind_framebuffer(0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The texture that receives the color output.
    #[inline]
    pub fn color(&self) -> &Texture {
        &self.color
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        self.device.delete_framebuffer(self.id);
        gl_call!(self.device, delete_renderbuffer(self.depth_stencil));
    }
}
