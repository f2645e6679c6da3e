//! Thin owning handles over the GPU objects of an OpenGL 3.3 context.
//!
//! Every handle keeps a `Rc<Device>` and releases its device object when dropped. The
//! handles are single-threaded, and all of their raw calls go through `Device::call`
//! which reports device errors through the `log` facade.

#[macro_use]
mod macros;

pub mod backends;
pub mod buffer;
pub mod device;
pub mod errors;
pub mod framebuffer;
pub mod layout;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod types;
pub mod vertex_array;

/// Maximum number of vertex attribute slots a vertex array can configure.
pub const MAX_VERTEX_ATTRIBUTES: u32 = 16;
/// Maximum number of texture units a texture can be bound to.
pub const MAX_TEXTURE_SLOTS: u32 = 16;

pub mod prelude {
    pub use super::buffer::{IndexBuffer, VertexBuffer};
    pub use super::device::{Bindings, Device};
    pub use super::errors::{Error as VideoError, Result as VideoResult};
    pub use super::framebuffer::Framebuffer;
    pub use super::layout::{VertexBufferElement, VertexBufferLayout, VertexElement};
    pub use super::renderer::Renderer;
    pub use super::shader::Shader;
    pub use super::texture::{Texture, TextureParams};
    pub use super::types::*;
    pub use super::vertex_array::VertexArray;
    pub use super::{MAX_TEXTURE_SLOTS, MAX_VERTEX_ATTRIBUTES};
}
