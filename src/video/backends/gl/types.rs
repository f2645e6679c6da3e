use gl;
use gl::types::*;

use crate::video::types::*;

impl From<BufferTarget> for GLenum {
    fn from(target: BufferTarget) -> Self {
        match target {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl From<BufferHint> for GLenum {
    fn from(hint: BufferHint) -> Self {
        match hint {
            BufferHint::Static => gl::STATIC_DRAW,
            BufferHint::Stream => gl::STREAM_DRAW,
            BufferHint::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

impl From<VertexFormat> for GLenum {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Byte => gl::BYTE,
            VertexFormat::UByte => gl::UNSIGNED_BYTE,
            VertexFormat::Short => gl::SHORT,
            VertexFormat::UShort => gl::UNSIGNED_SHORT,
            VertexFormat::Int => gl::INT,
            VertexFormat::UInt => gl::UNSIGNED_INT,
            VertexFormat::Float => gl::FLOAT,
        }
    }
}

impl From<IndexFormat> for GLenum {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::U16 => gl::UNSIGNED_SHORT,
            IndexFormat::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<TextureTarget> for GLenum {
    fn from(target: TextureTarget) -> Self {
        match target {
            TextureTarget::Texture2D => gl::TEXTURE_2D,
            TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
        }
    }
}

impl From<ImageTarget> for GLenum {
    fn from(target: ImageTarget) -> Self {
        match target {
            ImageTarget::Texture2D => gl::TEXTURE_2D,
            ImageTarget::CubeFace(CubeFace::Right) => gl::TEXTURE_CUBE_MAP_POSITIVE_X,
            ImageTarget::CubeFace(CubeFace::Left) => gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
            ImageTarget::CubeFace(CubeFace::Top) => gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
            ImageTarget::CubeFace(CubeFace::Bottom) => gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
            ImageTarget::CubeFace(CubeFace::Front) => gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
            ImageTarget::CubeFace(CubeFace::Back) => gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
        }
    }
}

impl From<TextureWrap> for GLenum {
    fn from(wrap: TextureWrap) -> Self {
        match wrap {
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::Mirror => gl::MIRRORED_REPEAT,
            TextureWrap::Clamp => gl::CLAMP_TO_EDGE,
        }
    }
}

impl From<TextureFilter> for GLenum {
    fn from(filter: TextureFilter) -> Self {
        match filter {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}

impl From<ShaderStage> for GLenum {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl From<Attachment> for GLenum {
    fn from(attachment: Attachment) -> Self {
        match attachment {
            Attachment::Color0 => gl::COLOR_ATTACHMENT0,
            Attachment::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

impl From<Capability> for GLenum {
    fn from(capability: Capability) -> Self {
        match capability {
            Capability::DepthTest => gl::DEPTH_TEST,
            Capability::StencilTest => gl::STENCIL_TEST,
            Capability::Blend => gl::BLEND,
            Capability::CullFace => gl::CULL_FACE,
        }
    }
}

impl From<Comparison> for GLenum {
    fn from(cmp: Comparison) -> Self {
        match cmp {
            Comparison::Never => gl::NEVER,
            Comparison::Less => gl::LESS,
            Comparison::LessOrEqual => gl::LEQUAL,
            Comparison::Greater => gl::GREATER,
            Comparison::GreaterOrEqual => gl::GEQUAL,
            Comparison::Equal => gl::EQUAL,
            Comparison::NotEqual => gl::NOTEQUAL,
            Comparison::Always => gl::ALWAYS,
        }
    }
}

impl From<StencilAction> for GLenum {
    fn from(action: StencilAction) -> Self {
        match action {
            StencilAction::Keep => gl::KEEP,
            StencilAction::Zero => gl::ZERO,
            StencilAction::Replace => gl::REPLACE,
            StencilAction::Increment => gl::INCR,
            StencilAction::Decrement => gl::DECR,
            StencilAction::Invert => gl::INVERT,
        }
    }
}

impl From<BlendFactor> for GLenum {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::Value(BlendValue::SourceColor) => gl::SRC_COLOR,
            BlendFactor::Value(BlendValue::SourceAlpha) => gl::SRC_ALPHA,
            BlendFactor::Value(BlendValue::DestinationColor) => gl::DST_COLOR,
            BlendFactor::Value(BlendValue::DestinationAlpha) => gl::DST_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::SourceColor) => gl::ONE_MINUS_SRC_COLOR,
            BlendFactor::OneMinusValue(BlendValue::SourceAlpha) => gl::ONE_MINUS_SRC_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::DestinationColor) => gl::ONE_MINUS_DST_COLOR,
            BlendFactor::OneMinusValue(BlendValue::DestinationAlpha) => gl::ONE_MINUS_DST_ALPHA,
        }
    }
}

impl From<PolygonMode> for GLenum {
    fn from(mode: PolygonMode) -> Self {
        match mode {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        }
    }
}

impl From<ClearFlags> for GLbitfield {
    fn from(flags: ClearFlags) -> Self {
        let mut bits = 0;
        if flags.contains(ClearFlags::COLOR) {
            bits |= gl::COLOR_BUFFER_BIT;
        }

        if flags.contains(ClearFlags::DEPTH) {
            bits |= gl::DEPTH_BUFFER_BIT;
        }

        if flags.contains(ClearFlags::STENCIL) {
            bits |= gl::STENCIL_BUFFER_BIT;
        }

        bits
    }
}

pub fn framebuffer_status(status: GLenum) -> FramebufferStatus {
    match status {
        gl::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
        gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
        gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
        gl::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
        v => FramebufferStatus::Unknown(v),
    }
}
