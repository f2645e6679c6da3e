use super::types::VertexFormat;

/// Element types that can be pushed into a `VertexBufferLayout`.
pub trait VertexElement {
    const FORMAT: VertexFormat;
    /// Integer data is normalized into `[0, 1]` when fetched.
    const NORMALIZED: bool;
}

impl VertexElement for f32 {
    const FORMAT: VertexFormat = VertexFormat::Float;
    const NORMALIZED: bool = false;
}

impl VertexElement for u32 {
    const FORMAT: VertexFormat = VertexFormat::UInt;
    const NORMALIZED: bool = false;
}

impl VertexElement for u8 {
    const FORMAT: VertexFormat = VertexFormat::UByte;
    const NORMALIZED: bool = true;
}

/// One attribute inside an interleaved vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexBufferElement {
    pub format: VertexFormat,
    pub count: u32,
    pub normalized: bool,
}

impl VertexBufferElement {
    /// Size in bytes of this attribute.
    #[inline]
    pub fn size(&self) -> u32 {
        self.count * self.format.size()
    }
}

/// An ordered description of the attributes of one interleaved vertex.
///
/// ```
/// use glsandbox::video::prelude::*;
///
/// let mut layout = VertexBufferLayout::new();
/// layout.push::<f32>(3);
/// layout.push::<f32>(2);
/// assert_eq!(layout.stride(), 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        VertexBufferLayout::default()
    }

    /// Appends `count` components of type `T`.
    pub fn push<T: VertexElement>(&mut self, count: u32) -> &mut Self {
        let element = VertexBufferElement {
            format: T::FORMAT,
            count,
            normalized: T::NORMALIZED,
        };

        self.stride += element.size();
        self.elements.push(element);
        self
    }

    #[inline]
    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Bytes per vertex.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push() {
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(3).push::<u8>(4).push::<u32>(1);

        assert_eq!(layout.stride(), 12 + 4 + 4);
        assert_eq!(layout.elements().len(), 3);
        assert_eq!(layout.elements()[1].format, VertexFormat::UByte);
        assert!(layout.elements()[1].normalized);
        assert!(!layout.elements()[2].normalized);
    }

    #[test]
    fn empty() {
        let layout = VertexBufferLayout::new();
        assert_eq!(layout.stride(), 0);
        assert!(layout.elements().is_empty());
    }
}
