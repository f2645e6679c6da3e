extern crate glsandbox;

use std::cell::RefCell;
use std::rc::Rc;

use glsandbox::cgmath::{Matrix4, SquareMatrix, Vector4};
use glsandbox::video::backends::headless::{HeadlessState, HeadlessVisitor};
use glsandbox::video::errors::Error;
use glsandbox::video::prelude::*;

fn headless() -> (Rc<Device>, Rc<RefCell<HeadlessState>>) {
    let visitor = HeadlessVisitor::new();
    let state = visitor.state();
    (Device::new(Box::new(visitor)), state)
}

const VS: &str = "#version 330 core\nuniform mat4 u_MVP;\nvoid main() { gl_Position = vec4(0.0); }\n";
const FS: &str = "#version 330 core\nout vec4 color;\nuniform vec4 u_Color;\nuniform sampler2D u_Textures[2];\nvoid main() { color = u_Color; }\n";

#[test]
fn combined_and_split() {
    let (device, state) = headless();

    let combined = Shader::from_file(&device, "tests/resources/shaders/basic.glsl").unwrap();
    let split = Shader::from_files(
        &device,
        "tests/resources/shaders/basic.vert",
        "tests/resources/shaders/basic.frag",
    )
    .unwrap();

    let state = state.borrow();
    let a = &state.programs[&combined.id()];
    let b = &state.programs[&split.id()];
    assert!(a.linked && b.linked);
    assert_eq!(a.uniforms, b.uniforms);
    assert!(a.uniforms.contains_key("u_MVP"));
    assert!(a.uniforms.contains_key("u_Texture"));

    // Stage objects are released once linked.
    assert!(state.shaders.is_empty());
    assert_eq!(device.failures(), 0);
}

#[test]
fn missing_stage() {
    let (device, state) = headless();

    match Shader::from_file(&device, "tests/resources/shaders/vertex_only.glsl") {
        Err(Error::ShaderStageMissing { stage, .. }) => assert_eq!(stage, ShaderStage::Fragment),
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a program without fragment stage"),
    }

    assert_eq!(state.borrow().live_objects(), 0);
}

#[test]
fn missing_file() {
    let (device, _) = headless();
    match Shader::from_file(&device, "tests/resources/shaders/nope.glsl") {
        Err(Error::Io(..)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a program from nothing"),
    }
}

#[test]
fn compile_errors() {
    let (device, state) = headless();

    match Shader::from_sources(&device, "this is not glsl", FS) {
        Err(Error::ShaderCompile { stage, log }) => {
            assert_eq!(stage, ShaderStage::Vertex);
            assert!(!log.is_empty());
        }
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a program from broken sources"),
    }

    match Shader::from_sources(&device, VS, "void mian() {}") {
        Err(Error::ShaderCompile { stage, .. }) => assert_eq!(stage, ShaderStage::Fragment),
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a program from broken sources"),
    }

    assert_eq!(state.borrow().live_objects(), 0);
}

#[test]
fn validation_does_not_fail_construction() {
    let (device, state) = headless();

    // Nothing is bound, so validation against the current state fails.
    let shader = Shader::from_sources(&device, VS, FS).unwrap();
    {
        let state = state.borrow();
        let program = &state.programs[&shader.id()];
        assert!(program.linked);
        assert!(program.log.contains("Validation"));
    }

    let va = VertexArray::new(&device);
    va.bind();
    let shader = Shader::from_sources(&device, VS, FS).unwrap();
    assert!(state.borrow().programs[&shader.id()].log.is_empty());

    shader.bind();
    assert_eq!(device.failures(), 0);
}

#[test]
fn uniform_cache() {
    let (device, state) = headless();

    let shader = Shader::from_sources(&device, VS, FS).unwrap();
    shader.bind();

    shader.set_uniform_4f("u_Color", 1.0, 0.0, 0.0, 1.0).unwrap();
    assert_eq!(state.borrow().uniform_queries, 1);

    shader.set_uniform_vec4("u_Color", Vector4::new(0.0, 1.0, 0.0, 1.0)).unwrap();
    shader.set_uniform_4f("u_Color", 0.0, 0.0, 1.0, 1.0).unwrap();
    assert_eq!(state.borrow().uniform_queries, 1);

    let location = shader.uniform_location("u_Color");
    let value = state.borrow().programs[&shader.id()].values[&location].clone();
    assert_eq!(value, UniformVariable::Vector4f([0.0, 0.0, 1.0, 1.0]));
    assert_eq!(state.borrow().uniform_queries, 1);

    // Misses are cached as well.
    shader.set_uniform_1f("u_Missing", 1.0).unwrap();
    shader.set_uniform_1f("u_Missing", 2.0).unwrap();
    assert_eq!(shader.uniform_location("u_Missing"), -1);
    assert_eq!(state.borrow().uniform_queries, 2);
    assert_eq!(device.failures(), 0);
}

#[test]
fn uniform_values() {
    let (device, state) = headless();

    let shader = Shader::from_sources(&device, VS, FS).unwrap();
    shader.bind();

    let mvp = Matrix4::identity();
    shader.set_uniform_mat4("u_MVP", &mvp).unwrap();
    shader.set_uniform_1iv("u_Textures", &[0, 1]).unwrap();

    let state = state.borrow();
    let values = &state.programs[&shader.id()].values;
    assert_eq!(
        values[&shader.uniform_location("u_MVP")],
        UniformVariable::Matrix4f(mvp.into())
    );

    match values[&shader.uniform_location("u_Textures")] {
        UniformVariable::I32Array(ref v) => assert_eq!(v.as_slice(), &[0, 1]),
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn not_bound() {
    let (device, _) = headless();

    let a = Shader::from_sources(&device, VS, FS).unwrap();
    let b = Shader::from_sources(&device, VS, FS).unwrap();

    match a.set_uniform_1i("u_Texture", 0) {
        Err(Error::ProgramNotBound(id)) => assert_eq!(id, a.id()),
        other => panic!("unexpected {:?}", other),
    }

    a.bind();
    assert!(a.is_bound());
    b.bind();
    assert!(!a.is_bound());
    assert!(a.set_uniform_1f("u_Color", 0.0).is_err());

    b.unbind();
    assert!(b.set_uniform_1f("u_Color", 0.0).is_err());
}

#[test]
fn drop_releases() {
    let (device, state) = headless();

    {
        let shader = Shader::from_sources(&device, VS, FS).unwrap();
        shader.bind();
    }

    assert_eq!(state.borrow().live_objects(), 0);
    assert_eq!(device.bindings().program, 0);
}
