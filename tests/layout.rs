extern crate glsandbox;
extern crate rand;

use std::cell::RefCell;
use std::rc::Rc;

use glsandbox::video::backends::headless::{HeadlessState, HeadlessVisitor};
use glsandbox::video::errors::Error;
use glsandbox::video::prelude::*;
use rand::Rng;

fn headless() -> (Rc<Device>, Rc<RefCell<HeadlessState>>) {
    let visitor = HeadlessVisitor::new();
    let state = visitor.state();
    (Device::new(Box::new(visitor)), state)
}

#[test]
fn stride() {
    let mut rng = rand::thread_rng();

    for _ in 0..64 {
        let mut layout = VertexBufferLayout::new();
        let mut expected = 0;

        for _ in 0..rng.gen_range(0, 8) {
            let count = rng.gen_range(1, 5);
            match rng.gen_range(0, 3) {
                0 => {
                    layout.push::<f32>(count);
                    expected += count * 4;
                }
                1 => {
                    layout.push::<u32>(count);
                    expected += count * 4;
                }
                _ => {
                    layout.push::<u8>(count);
                    expected += count;
                }
            }
        }

        assert_eq!(layout.stride(), expected);
        let sum: u32 = layout.elements().iter().map(|v| v.count * v.format.size()).sum();
        assert_eq!(layout.stride(), sum);
    }
}

#[test]
fn position_and_uv() {
    let (device, state) = headless();

    let vertices: [f32; 20] = [
        -0.5, -0.5, 0.0, 0.0, 0.0, //
        0.5, -0.5, 0.0, 1.0, 0.0, //
        0.5, 0.5, 0.0, 1.0, 1.0, //
        -0.5, 0.5, 0.0, 0.0, 1.0,
    ];

    let vb = VertexBuffer::from_slice(&device, &vertices).unwrap();
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(3).push::<f32>(2);

    let va = VertexArray::new(&device);
    va.add_buffer(&vb, &layout).unwrap();
    assert_eq!(va.slots(), 2);

    let state = state.borrow();
    let attributes = &state.vertex_arrays[&va.id()].attributes;
    assert_eq!(attributes.len(), 2);

    let position = attributes[&0];
    assert!(position.enabled);
    assert_eq!(position.buffer, vb.id());
    assert_eq!(position.divisor, 0);
    assert_eq!(
        position.pointer,
        Some(AttributePointer {
            size: 3,
            format: VertexFormat::Float,
            normalized: false,
            stride: 20,
            offset: 0,
        })
    );

    let uv = attributes[&1];
    assert!(uv.enabled);
    assert_eq!(
        uv.pointer,
        Some(AttributePointer {
            size: 2,
            format: VertexFormat::Float,
            normalized: false,
            stride: 20,
            offset: 12,
        })
    );

    assert_eq!(device.failures(), 0);
}

#[test]
fn multiple_buffers() {
    let (device, state) = headless();

    let positions = VertexBuffer::from_slice(&device, &[0.0f32; 12]).unwrap();
    let colors = VertexBuffer::from_slice(&device, &[255u8; 16]).unwrap();

    let mut l1 = VertexBufferLayout::new();
    l1.push::<f32>(3);
    let mut l2 = VertexBufferLayout::new();
    l2.push::<u8>(4);

    let va = VertexArray::new(&device);
    va.add_buffer(&positions, &l1).unwrap();
    va.add_buffer(&colors, &l2).unwrap();

    let state = state.borrow();
    let attributes = &state.vertex_arrays[&va.id()].attributes;
    assert_eq!(attributes[&0].buffer, positions.id());
    assert_eq!(attributes[&1].buffer, colors.id());

    let color = attributes[&1].pointer.unwrap();
    assert_eq!(color.format, VertexFormat::UByte);
    assert!(color.normalized);
    assert_eq!(color.stride, 4);
    assert_eq!(color.offset, 0);
}

#[test]
fn too_many_attributes() {
    let (device, _) = headless();

    let vb = VertexBuffer::from_slice(&device, &[0.0f32; 64]).unwrap();
    let mut layout = VertexBufferLayout::new();
    for _ in 0..(MAX_VERTEX_ATTRIBUTES + 1) {
        layout.push::<f32>(1);
    }

    let va = VertexArray::new(&device);
    match va.add_buffer(&vb, &layout) {
        Err(Error::TooManyAttributes(17, 16)) => {}
        other => panic!("unexpected {:?}", other.err()),
    }

    assert_eq!(va.slots(), 0);
}
