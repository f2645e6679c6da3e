extern crate glsandbox;

use std::cell::RefCell;
use std::rc::Rc;

use glsandbox::video::backends::headless::{HeadlessState, HeadlessVisitor};
use glsandbox::video::errors::Error;
use glsandbox::video::prelude::*;

fn headless() -> (Rc<Device>, Rc<RefCell<HeadlessState>>) {
    let visitor = HeadlessVisitor::new();
    let state = visitor.state();
    (Device::new(Box::new(visitor)), state)
}

#[test]
fn sub_update() {
    let (device, state) = headless();

    let bytes: Vec<u8> = (0..16).collect();
    let vb = VertexBuffer::new(&device, Some(&bytes[..]), 16, BufferHint::Dynamic).unwrap();
    vb.update(4, &[0xAA; 4]).unwrap();

    let data = state.borrow().buffers[&vb.id()].data.clone();
    assert_eq!(&data[..4], &bytes[..4]);
    assert_eq!(&data[4..8], &[0xAA; 4]);
    assert_eq!(&data[8..], &bytes[8..]);
    assert_eq!(device.failures(), 0);
}

#[test]
fn sub_update_out_of_bounds() {
    let (device, state) = headless();

    let vb = VertexBuffer::with_capacity(&device, 16).unwrap();
    match vb.update(14, &[1; 4]) {
        Err(Error::OutOfBounds { offset, len, size }) => {
            assert_eq!((offset, len, size), (14, 4, 16));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(state.borrow().buffers[&vb.id()].data, vec![0; 16]);
    assert!(vb.update(12, &[1; 4]).is_ok());
    assert_eq!(device.failures(), 0);
}

#[test]
fn immutable() {
    let (device, _) = headless();

    let vb = VertexBuffer::from_slice(&device, &[1.0f32, 2.0, 3.0]).unwrap();
    assert_eq!(vb.size(), 12);
    assert_eq!(vb.hint(), BufferHint::Static);

    match vb.update(0, &[0; 4]) {
        Err(Error::UpdateImmutableBuffer) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn update_rebinds() {
    let (device, state) = headless();

    let a = VertexBuffer::with_capacity(&device, 4).unwrap();
    let b = VertexBuffer::with_capacity(&device, 4).unwrap();
    b.bind();

    a.update(0, &[7; 4]).unwrap();
    assert_eq!(state.borrow().buffers[&a.id()].data, vec![7; 4]);
    assert_eq!(state.borrow().buffers[&b.id()].data, vec![0; 4]);
}

#[test]
fn data_larger_than_size() {
    let (device, state) = headless();
    assert!(VertexBuffer::new(&device, Some(&[0u8; 8][..]), 4, BufferHint::Static).is_err());
    assert_eq!(state.borrow().live_objects(), 0);
}

#[test]
fn data_smaller_than_size() {
    let (device, state) = headless();

    let vb = VertexBuffer::new(&device, Some(&[1u8, 2, 3, 4][..]), 16, BufferHint::Dynamic).unwrap();
    let data = state.borrow().buffers[&vb.id()].data.clone();
    assert_eq!(&data[..4], &[1, 2, 3, 4]);
    assert_eq!(&data[4..], &[0; 12]);
    assert_eq!(device.failures(), 0);
}

#[test]
fn update_overflow() {
    let (device, state) = headless();

    let vb = VertexBuffer::with_capacity(&device, 16).unwrap();
    match vb.update(usize::MAX, &[1]) {
        Err(Error::OutOfBounds { offset, len, size }) => {
            assert_eq!((offset, len, size), (usize::MAX, 1, 16));
        }
        other => panic!("unexpected {:?}", other),
    }

    let ib = IndexBuffer::with_capacity(&device, IndexFormat::U32, 4).unwrap();
    match ib.update(u32::MAX / 2, &[1u32]) {
        Err(Error::OutOfBounds { .. }) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(state.borrow().buffers[&vb.id()].data, vec![0; 16]);
    assert_eq!(state.borrow().buffers[&ib.id()].data, vec![0; 16]);
    assert_eq!(device.failures(), 0);
}

#[test]
fn index_buffer() {
    let (device, state) = headless();

    let ib = IndexBuffer::new(&device, &[0u16, 1, 2, 2, 3, 0]).unwrap();
    assert_eq!(ib.count(), 6);
    assert_eq!(ib.format(), IndexFormat::U16);
    assert_eq!(state.borrow().buffers[&ib.id()].data.len(), 12);

    let ib = IndexBuffer::with_capacity(&device, IndexFormat::U32, 4).unwrap();
    ib.update(2, &[9u32, 10]).unwrap();
    assert!(ib.update(0, &[1u16]).is_err());
    assert!(ib.update(3, &[1u32, 2]).is_err());

    let data = state.borrow().buffers[&ib.id()].data.clone();
    assert_eq!(&data[8..12], &9u32.to_ne_bytes());
}

#[test]
fn index_buffer_keeps_element_binding() {
    let (device, state) = headless();

    let ib = IndexBuffer::new(&device, &[0u32, 1, 2]).unwrap();
    let va = VertexArray::new(&device);
    va.bind();
    ib.bind();

    let _other = IndexBuffer::new(&device, &[2u32, 1, 0]).unwrap();
    assert_eq!(state.borrow().current_element_buffer(), ib.id());
}

#[test]
fn drop_releases() {
    let (device, state) = headless();

    {
        let _vb = VertexBuffer::with_capacity(&device, 64).unwrap();
        let _ib = IndexBuffer::new(&device, &[0u32, 1, 2]).unwrap();
        let _va = VertexArray::new(&device);
        assert_eq!(state.borrow().live_objects(), 3);
    }

    assert_eq!(state.borrow().live_objects(), 0);
    assert_eq!(device.bindings(), Bindings::default());
    assert_eq!(device.failures(), 0);
}
