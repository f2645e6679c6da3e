use std::rc::Rc;

use bytemuck::Pod;

use super::device::Device;
use super::errors::{Error, Result};
use super::types::{BufferHint, BufferTarget, IndexFormat};

/// The device object shared by vertex and index buffers.
///
/// Uploads always go through the array binding point, so creating or updating an index
/// buffer never touches the element binding of the currently bound vertex array.
struct RawBuffer {
    device: Rc<Device>,
    id: u32,
    size: usize,
    hint: BufferHint,
}

impl RawBuffer {
    fn new(device: &Rc<Device>, data: Option<&[u8]>, size: usize, hint: BufferHint) -> Result<Self> {
        if let Some(bytes) = data {
            if bytes.len() > size {
                return Err(Error::OutOfBounds {
                    offset: 0,
                    len: bytes.len(),
                    size,
                });
            }
        }

        let id = gl_call!(device, create_buffer());
        let buffer = RawBuffer {
            device: device.clone(),
            id,
            size,
            hint,
        };

        device.bind_buffer(BufferTarget::Array, id);
        match data {
            Some(bytes) if bytes.len() < size => {
                // The device reads `size` bytes from the source, so shorter data is
                // uploaded into freshly allocated storage instead.
                gl_call!(device, buffer_data(BufferTarget::Array, size, None, hint));
                gl_call!(device, buffer_sub_data(BufferTarget::Array, 0, bytes));
            }
            _ => {
                gl_call!(device, buffer_data(BufferTarget::Array, size, data, hint));
            }
        }

        Ok(buffer)
    }

    fn update(&self, offset: usize, data: &[u8]) -> Result<()> {
        if !self.hint.is_mutable() {
            return Err(Error::UpdateImmutableBuffer);
        }

        let end = offset.checked_add(data.len());
        if end.map_or(true, |end| end > self.size) {
            return Err(Error::OutOfBounds {
                offset,
                len: data.len(),
                size: self.size,
            });
        }

        self.device.bind_buffer(BufferTarget::Array, self.id);
        gl_call!(self.device, buffer_sub_data(BufferTarget::Array, offset, data));
        Ok(())
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.id);
    }
}

/// A buffer of vertex attribute data.
pub struct VertexBuffer {
    buf: RawBuffer,
}

impl VertexBuffer {
    /// Creates a buffer of `size` bytes, initialized with `data` if any.
    ///
    /// `None` with a mutable hint allocates the storage only, to be filled by `update`.
    pub fn new(
        device: &Rc<Device>,
        data: Option<&[u8]>,
        size: usize,
        hint: BufferHint,
    ) -> Result<Self> {
        let buf = RawBuffer::new(device, data, size, hint)?;
        Ok(VertexBuffer { buf })
    }

    /// Creates a static buffer holding `vertices`.
    pub fn from_slice<T: Pod>(device: &Rc<Device>, vertices: &[T]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        VertexBuffer::new(device, Some(bytes), bytes.len(), BufferHint::Static)
    }

    /// Creates a dynamic buffer with `size` bytes of uninitialized storage.
    pub fn with_capacity(device: &Rc<Device>, size: usize) -> Result<Self> {
        VertexBuffer::new(device, None, size, BufferHint::Dynamic)
    }

    /// Replaces the bytes in `[offset, offset + data.len())`, leaving the rest intact.
    pub fn update(&self, offset: usize, data: &[u8]) -> Result<()> {
        self.buf.update(offset, data)
    }

    /// Replaces a range starting at the byte `offset` with `vertices`.
    pub fn update_slice<T: Pod>(&self, offset: usize, vertices: &[T]) -> Result<()> {
        self.buf.update(offset, bytemuck::cast_slice(vertices))
    }

    pub fn bind(&self) {
        self.buf.device.bind_buffer(BufferTarget::Array, self.buf.id);
    }

    pub fn unbind(&self) {
        self.buf.device.bind_buffer(BufferTarget::Array, 0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.buf.id
    }

    /// Size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.buf.size
    }

    #[inline]
    pub fn hint(&self) -> BufferHint {
        self.buf.hint
    }
}

/// Integer types that can be used as indices.
pub trait IndexElement: Pod {
    const FORMAT: IndexFormat;
}

impl IndexElement for u16 {
    const FORMAT: IndexFormat = IndexFormat::U16;
}

impl IndexElement for u32 {
    const FORMAT: IndexFormat = IndexFormat::U32;
}

/// A buffer of triangle indices.
pub struct IndexBuffer {
    buf: RawBuffer,
    format: IndexFormat,
    count: u32,
}

impl IndexBuffer {
    /// Creates a static index buffer.
    pub fn new<T: IndexElement>(device: &Rc<Device>, indices: &[T]) -> Result<Self> {
        IndexBuffer::with_hint(device, indices, BufferHint::Static)
    }

    pub fn with_hint<T: IndexElement>(
        device: &Rc<Device>,
        indices: &[T],
        hint: BufferHint,
    ) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let buf = RawBuffer::new(device, Some(bytes), bytes.len(), hint)?;

        Ok(IndexBuffer {
            buf,
            format: T::FORMAT,
            count: indices.len() as u32,
        })
    }

    /// Creates a dynamic index buffer with room for `count` indices.
    pub fn with_capacity(device: &Rc<Device>, format: IndexFormat, count: u32) -> Result<Self> {
        let size = (count as usize)
            .checked_mul(format.size() as usize)
            .ok_or_else(|| Error::OutOfBounds {
                offset: 0,
                len: count as usize,
                size: usize::MAX,
            })?;

        let buf = RawBuffer::new(device, None, size, BufferHint::Dynamic)?;

        Ok(IndexBuffer { buf, format, count })
    }

    /// Replaces indices starting at the index `first`.
    pub fn update<T: IndexElement>(&self, first: u32, indices: &[T]) -> Result<()> {
        if T::FORMAT != self.format {
            return Err(Error::Backend(format!(
                "Index format mismatch, buffer holds {:?} but got {:?}.",
                self.format,
                T::FORMAT
            )));
        }

        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let offset = (first as usize)
            .checked_mul(self.format.size() as usize)
            .ok_or_else(|| Error::OutOfBounds {
                offset: usize::MAX,
                len: bytes.len(),
                size: self.buf.size,
            })?;

        self.buf.update(offset, bytes)
    }

    pub fn bind(&self) {
        self.buf
            .device
            .bind_buffer(BufferTarget::ElementArray, self.buf.id);
    }

    pub fn unbind(&self) {
        self.buf.device.bind_buffer(BufferTarget::ElementArray, 0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.buf.id
    }

    /// Number of indices.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn format(&self) -> IndexFormat {
        self.format
    }
}
