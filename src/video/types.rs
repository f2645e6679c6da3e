//! Plain descriptions of device state shared by the frontend handles and the
//! backend visitors.

use std::fmt;
use std::ops::BitOr;

use smallvec::SmallVec;

/// The binding point of a buffer object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Indices used by indexed draws.
    ElementArray,
}

/// Hint abouts the intended update strategy of the data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferHint {
    /// The data store contents will be modified once, and used many times.
    Static,
    /// The data store contents will be modified repeatedly, and used many times.
    Dynamic,
    /// The data store contents will be modified once per frame, and used at most a few times.
    Stream,
}

impl BufferHint {
    #[inline]
    pub fn is_mutable(self) -> bool {
        self != BufferHint::Static
    }
}

/// The data type of each component of a vertex attribute.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Float,
}

impl VertexFormat {
    /// Size in bytes of one component.
    pub fn size(self) -> u32 {
        match self {
            VertexFormat::Byte | VertexFormat::UByte => 1,
            VertexFormat::Short | VertexFormat::UShort => 2,
            VertexFormat::Int | VertexFormat::UInt | VertexFormat::Float => 4,
        }
    }
}

/// The data type of the indices in an index buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    pub fn size(self) -> u32 {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// Description of one attribute pointer inside a vertex array.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributePointer {
    /// Number of components, 1 to 4.
    pub size: u32,
    pub format: VertexFormat,
    pub normalized: bool,
    /// Byte distance between two consecutive vertices.
    pub stride: u32,
    /// Byte offset of the first component inside the bound buffer.
    pub offset: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Texture2D,
    CubeMap,
}

/// The faces of a cube map, in the order their images are expected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Front,
        CubeFace::Back,
    ];
}

/// The image slot written by a texture upload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ImageTarget {
    Texture2D,
    CubeFace(CubeFace),
}

impl ImageTarget {
    pub fn texture_target(self) -> TextureTarget {
        match self {
            ImageTarget::Texture2D => TextureTarget::Texture2D,
            ImageTarget::CubeFace(_) => TextureTarget::CubeMap,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureWrap {
    Repeat,
    Mirror,
    Clamp,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Values that can be assigned to a uniform variable.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformVariable {
    I32(i32),
    F32(f32),
    Vector2f([f32; 2]),
    Vector3f([f32; 3]),
    Vector4f([f32; 4]),
    /// Column-major 4x4 matrix.
    Matrix4f([[f32; 4]; 4]),
    I32Array(SmallVec<[i32; 8]>),
}

/// Framebuffer attachment points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Attachment {
    Color0,
    DepthStencil,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    IncompleteAttachment,
    MissingAttachment,
    Unsupported,
    Unknown(u32),
}

/// Server-side capabilities that scenes toggle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    StencilTest,
    Blend,
    CullFace,
}

/// Specify what kind of depth or stencil test should be used.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Comparison {
    Never,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Always,
}

/// Action taken on the stored stencil value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StencilAction {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    Invert,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendValue {
    SourceColor,
    SourceAlpha,
    DestinationColor,
    DestinationAlpha,
}

/// Specify how source and destination colors are combined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    Value(BlendValue),
    OneMinusValue(BlendValue),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// The buffers touched by a clear.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClearFlags(u8);

impl ClearFlags {
    pub const COLOR: ClearFlags = ClearFlags(0b001);
    pub const DEPTH: ClearFlags = ClearFlags(0b010);
    pub const STENCIL: ClearFlags = ClearFlags(0b100);
    pub const ALL: ClearFlags = ClearFlags(0b111);

    #[inline]
    pub fn contains(self, other: ClearFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ClearFlags {
    type Output = ClearFlags;

    fn bitor(self, rhs: ClearFlags) -> ClearFlags {
        ClearFlags(self.0 | rhs.0)
    }
}

/// Error codes reported by the device, numerically identical to OpenGL's.
pub mod error_code {
    pub const NO_ERROR: u32 = 0;
    pub const INVALID_ENUM: u32 = 0x0500;
    pub const INVALID_VALUE: u32 = 0x0501;
    pub const INVALID_OPERATION: u32 = 0x0502;
    pub const OUT_OF_MEMORY: u32 = 0x0505;
    pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;

    /// Human readable description of an error code.
    pub fn describe(code: u32) -> &'static str {
        match code {
            NO_ERROR => "No error.",
            INVALID_ENUM => "An unacceptable value is specified for an enumerated argument.",
            INVALID_VALUE => "A numeric argument is out of range.",
            INVALID_OPERATION => "The specified operation is not allowed in the current state.",
            OUT_OF_MEMORY => "There is not enough memory left to execute the command.",
            INVALID_FRAMEBUFFER_OPERATION => {
                "The command is trying to render to or read from the framebuffer while the \
                 currently bound framebuffer is not framebuffer complete."
            }
            _ => "Unknown error.",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clear_flags() {
        let flags = ClearFlags::COLOR | ClearFlags::DEPTH;
        assert!(flags.contains(ClearFlags::COLOR));
        assert!(flags.contains(ClearFlags::DEPTH));
        assert!(!flags.contains(ClearFlags::STENCIL));
        assert!(ClearFlags::ALL.contains(flags));
        assert!(ClearFlags::default().is_empty());
    }

    #[test]
    fn vertex_format_size() {
        assert_eq!(VertexFormat::Float.size(), 4);
        assert_eq!(VertexFormat::UByte.size(), 1);
        assert_eq!(VertexFormat::UShort.size(), 2);
        assert_eq!(IndexFormat::U16.size(), 2);
    }
}
