use std::cell::Cell;
use std::rc::Rc;

use super::buffer::VertexBuffer;
use super::device::Device;
use super::errors::{Error, Result};
use super::layout::VertexBufferLayout;
use super::types::{AttributePointer, BufferTarget};
use super::MAX_VERTEX_ATTRIBUTES;

/// Associates vertex buffers with attribute slots.
///
/// Slots are assigned in order across calls of `add_buffer` and `add_instance_buffer`,
/// so a vertex array can combine several buffers.
pub struct VertexArray {
    device: Rc<Device>,
    id: u32,
    slots: Cell<u32>,
}

impl VertexArray {
    pub fn new(device: &Rc<Device>) -> Self {
        let id = gl_call!(device, create_vertex_array());
        VertexArray {
            device: device.clone(),
            id,
            slots: Cell::new(0),
        }
    }

    /// Describes the per-vertex attributes stored in `buffer`.
    pub fn add_buffer(&self, buffer: &VertexBuffer, layout: &VertexBufferLayout) -> Result<()> {
        self.add(buffer, layout, 0)
    }

    /// Describes attributes stored in `buffer` that advance once per instance.
    pub fn add_instance_buffer(
        &self,
        buffer: &VertexBuffer,
        layout: &VertexBufferLayout,
    ) -> Result<()> {
        self.add(buffer, layout, 1)
    }

    fn add(&self, buffer: &VertexBuffer, layout: &VertexBufferLayout, divisor: u32) -> Result<()> {
        let first = self.slots.get();
        let len = layout.elements().len() as u32;
        if first + len > MAX_VERTEX_ATTRIBUTES {
            return Err(Error::TooManyAttributes(first + len, MAX_VERTEX_ATTRIBUTES));
        }

        self.bind();
        buffer.bind();

        let mut offset = 0;
        for (i, element) in layout.elements().iter().enumerate() {
            let pointer = AttributePointer {
                size: element.count,
                format: element.format,
                normalized: element.normalized,
                stride: layout.stride(),
                offset,
            };

            self.configure(first + i as u32, pointer, divisor);
            offset += element.size();
        }

        self.slots.set(first + len);
        Ok(())
    }

    /// Configures the attribute slot `index` directly, reading from `buffer`.
    ///
    /// Slots configured this way are not tracked by the automatic numbering of
    /// `add_buffer`.
    pub fn set_attribute(
        &self,
        buffer: &VertexBuffer,
        index: u32,
        pointer: AttributePointer,
        divisor: u32,
    ) -> Result<()> {
        if index >= MAX_VERTEX_ATTRIBUTES {
            return Err(Error::TooManyAttributes(index + 1, MAX_VERTEX_ATTRIBUTES));
        }

        self.bind();
        buffer.bind();
        self.configure(index, pointer, divisor);
        Ok(())
    }

    fn configure(&self, index: u32, pointer: AttributePointer, divisor: u32) {
        gl_call!(self.device, enable_vertex_attribute(index));
        gl_call!(self.device, vertex_attribute_pointer(index, pointer));
        if divisor > 0 {
            gl_call!(self.device, vertex_attribute_divisor(index, divisor));
        }
    }

    pub fn bind(&self) {
        self.device.bind_vertex_array(self.id);
    }

    pub fn unbind(&self) {
        self.device.bind_vertex_array(0);
        self.device.bind_buffer(BufferTarget::Array, 0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Number of attribute slots assigned by `add_buffer` and `add_instance_buffer`.
    #[inline]
    pub fn slots(&self) -> u32 {
        self.slots.get()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.id);
    }
}
