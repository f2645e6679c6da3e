use std::path::PathBuf;

use super::types::ShaderStage;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "OpenGL implementation doesn't support {}.", _0)]
    Requirement(String),
    #[fail(display = "Failed to read {:?}: {}", _0, _1)]
    Io(PathBuf, String),
    #[fail(display = "Failed to compile {} shader, errors: \n{}", stage, log)]
    ShaderCompile { stage: ShaderStage, log: String },
    #[fail(display = "Failed to link shader program, errors: \n{}", _0)]
    ShaderLink(String),
    #[fail(display = "Shader source {:?} has no {} section.", path, stage)]
    ShaderStageMissing { path: PathBuf, stage: ShaderStage },
    #[fail(display = "Shader program {} is not bound.", _0)]
    ProgramNotBound(u32),
    #[fail(display = "Failed to decode image {:?}: {}", path, reason)]
    TextureDecode { path: PathBuf, reason: String },
    #[fail(display = "Cube map requires exactly 6 faces, got {}.", _0)]
    CubeMapFaces(usize),
    #[fail(display = "Cube map face {:?} does not match the size of the first face.", _0)]
    CubeMapFaceSize(PathBuf),
    #[fail(display = "Texture data has {} bytes, expected {}.", _0, _1)]
    TextureDataSize(usize, usize),
    #[fail(display = "Texture slot {} is out of range (max {}).", _0, _1)]
    TextureSlot(u32, u32),
    #[fail(display = "Trying to update immutable buffer.")]
    UpdateImmutableBuffer,
    #[fail(
        display = "Out of bounds: {} bytes at offset {} exceed the buffer size {}.",
        len, offset, size
    )]
    OutOfBounds { offset: usize, len: usize, size: usize },
    #[fail(display = "Too many vertex attributes ({} > {}).", _0, _1)]
    TooManyAttributes(u32, u32),
    #[fail(display = "Framebuffer is incomplete: {}", _0)]
    FramebufferIncomplete(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
