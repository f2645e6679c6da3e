extern crate env_logger;
extern crate glsandbox;

use std::cell::RefCell;
use std::rc::Rc;

use glsandbox::video::backends::headless::{DrawRecord, HeadlessState, HeadlessVisitor};
use glsandbox::video::prelude::*;

fn headless() -> (Rc<Device>, Rc<RefCell<HeadlessState>>) {
    let _ = env_logger::try_init();
    let visitor = HeadlessVisitor::new();
    let state = visitor.state();
    (Device::new(Box::new(visitor)), state)
}

const VS: &str = "#version 330 core\nlayout(location = 0) in vec2 a;\nlayout(location = 1) in vec2 offset;\nvoid main() { gl_Position = vec4(a + offset, 0.0, 1.0); }\n";
const FS: &str = "#version 330 core\nout vec4 color;\nvoid main() { color = vec4(1.0); }\n";

struct Quad {
    va: VertexArray,
    ib: IndexBuffer,
    shader: Shader,
    _vb: VertexBuffer,
}

fn quad(device: &Rc<Device>) -> Quad {
    let vb = VertexBuffer::from_slice(device, &[0.0f32, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]).unwrap();
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2);

    let va = VertexArray::new(device);
    va.add_buffer(&vb, &layout).unwrap();

    Quad {
        va,
        ib: IndexBuffer::new(device, &[0u32, 1, 2, 2, 3, 0]).unwrap(),
        shader: Shader::from_sources(device, VS, FS).unwrap(),
        _vb: vb,
    }
}

#[test]
fn draw_rebinds() {
    let (device, state) = headless();
    let renderer = Renderer::new(&device);

    let a = quad(&device);
    let b = quad(&device);

    renderer.draw(&a.va, &a.ib, &a.shader);
    b.va.bind();
    b.ib.bind();
    b.shader.bind();
    renderer.draw(&a.va, &a.ib, &a.shader);

    let expected = DrawRecord {
        vertex_array: a.va.id(),
        element_buffer: a.ib.id(),
        program: a.shader.id(),
        count: 6,
        format: IndexFormat::U32,
        instances: None,
    };

    assert_eq!(state.borrow().draws, vec![expected, expected]);
    assert_eq!(device.failures(), 0);
}

#[test]
fn draw_instanced() {
    let (device, state) = headless();
    let renderer = Renderer::new(&device);
    let a = quad(&device);

    let offsets = VertexBuffer::from_slice(&device, &[0.0f32; 2 * 10]).unwrap();
    let mut layout = VertexBufferLayout::new();
    layout.push::<f32>(2);
    a.va.add_instance_buffer(&offsets, &layout).unwrap();

    renderer.draw_instanced(&a.va, &a.ib, &a.shader, 0);
    assert!(state.borrow().draws.is_empty());

    renderer.draw_instanced(&a.va, &a.ib, &a.shader, 10);

    let state = state.borrow();
    assert_eq!(state.draws.len(), 1);
    assert_eq!(state.draws[0].instances, Some(10));
    assert_eq!(state.draws[0].count, 6);

    let attributes = &state.vertex_arrays[&a.va.id()].attributes;
    assert_eq!(attributes[&0].divisor, 0);
    assert_eq!(attributes[&1].divisor, 1);
    assert_eq!(attributes[&1].buffer, offsets.id());
    assert_eq!(device.failures(), 0);
}

#[test]
fn raw_attribute() {
    let (device, state) = headless();
    let a = quad(&device);

    let offsets = VertexBuffer::from_slice(&device, &[0.0f32; 2 * 10]).unwrap();
    let pointer = AttributePointer {
        size: 2,
        format: VertexFormat::Float,
        normalized: false,
        stride: 8,
        offset: 0,
    };

    a.va.set_attribute(&offsets, 2, pointer, 1).unwrap();
    assert!(a.va.set_attribute(&offsets, MAX_VERTEX_ATTRIBUTES, pointer, 1).is_err());

    let state = state.borrow();
    let attribute = state.vertex_arrays[&a.va.id()].attributes[&2];
    assert_eq!(attribute.pointer, Some(pointer));
    assert_eq!(attribute.divisor, 1);
}

#[test]
fn clear() {
    let (device, state) = headless();
    let renderer = Renderer::new(&device);

    renderer.set_clear_color([0.2, 0.3, 0.8, 1.0]);
    renderer.clear();
    renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL);
    renderer.clear_with(ClearFlags::default());

    let state = state.borrow();
    assert_eq!(state.clear_color, [0.2, 0.3, 0.8, 1.0]);
    assert_eq!(state.clears, vec![ClearFlags::COLOR, ClearFlags::ALL]);
}

#[test]
fn stale_errors_and_failures() {
    let (device, state) = headless();
    let renderer = Renderer::new(&device);
    let a = quad(&device);

    state.borrow_mut().inject_error(0x0502);
    renderer.draw(&a.va, &a.ib, &a.shader);
    assert_eq!(device.failures(), 0);
    assert_eq!(state.borrow().draws.len(), 1);

    device.bind_vertex_array(a.va.id() + 1000);
    assert_eq!(device.failures(), 1);
}

#[test]
fn draw_reports_failure() {
    let (device, state) = headless();
    let renderer = Renderer::new(&device);
    let a = quad(&device);

    assert!(renderer.draw(&a.va, &a.ib, &a.shader));
    assert!(renderer.draw_instanced(&a.va, &a.ib, &a.shader, 0));

    state.borrow_mut().inject_draw_error(0x0502);
    assert!(!renderer.draw(&a.va, &a.ib, &a.shader));

    state.borrow_mut().inject_draw_error(0x0502);
    assert!(!renderer.draw_instanced(&a.va, &a.ib, &a.shader, 4));

    assert!(renderer.draw(&a.va, &a.ib, &a.shader));
    assert_eq!(state.borrow().draws.len(), 2);
    assert_eq!(device.failures(), 2);
}

#[test]
fn framebuffer() {
    let (device, state) = headless();

    {
        let fbo = Framebuffer::new(&device, 320, 240).unwrap();
        assert_eq!(state.borrow().framebuffer, 0);
        assert_eq!((fbo.color().width(), fbo.color().height()), (320, 240));

        fbo.bind();
        assert_eq!(state.borrow().framebuffer, fbo.id());
        assert_eq!(device.bindings().framebuffer, fbo.id());

        let fbos = state.borrow().framebuffers[&fbo.id()];
        assert_eq!(fbos.color, fbo.color().id());
        assert_ne!(fbos.depth_stencil, 0);

        fbo.unbind();
        assert_eq!(state.borrow().framebuffer, 0);
    }

    assert_eq!(state.borrow().live_objects(), 0);
    assert_eq!(device.failures(), 0);
}
