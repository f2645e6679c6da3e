extern crate glsandbox;
extern crate image;

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use glsandbox::video::backends::headless::{HeadlessState, HeadlessVisitor};
use glsandbox::video::errors::Error;
use glsandbox::video::prelude::*;

fn headless() -> (Rc<Device>, Rc<RefCell<HeadlessState>>) {
    let visitor = HeadlessVisitor::new();
    let state = visitor.state();
    (Device::new(Box::new(visitor)), state)
}

/// Writes a PNG whose rows are filled with the row index.
fn png(name: &str, width: u32, height: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "glsandbox-{}-{}.png",
        std::process::id(),
        name
    ));

    let image = image::RgbaImage::from_fn(width, height, |_, y| image::Rgba([y as u8, 0, 0, 255]));
    image.save(&path).unwrap();
    path
}

#[test]
fn texture_2d() {
    let (device, state) = headless();

    let path = png("2d", 2, 3);
    let texture = Texture::from_file(&device, &path).unwrap();
    assert_eq!((texture.width(), texture.height()), (2, 3));
    assert_eq!(texture.target(), TextureTarget::Texture2D);

    {
        let state = state.borrow();
        let object = &state.textures[&texture.id()];
        assert_eq!(object.wrap, TextureWrap::Clamp);
        assert_eq!(object.filter, TextureFilter::Linear);

        // Rows are flipped, the first row of the file is uploaded last.
        let pixels = &object.pixels[&ImageTarget::Texture2D];
        assert_eq!(pixels.len(), 2 * 3 * 4);
        assert_eq!(pixels[0], 2);
        assert_eq!(pixels[2 * 2 * 4], 0);
    }

    texture.bind(3).unwrap();
    assert_eq!(state.borrow().bound_texture(3, TextureTarget::Texture2D), texture.id());
    assert_eq!(device.bindings().texture_slot, 3);

    texture.bind_default();
    assert_eq!(state.borrow().bound_texture(0, TextureTarget::Texture2D), texture.id());
    assert_eq!(device.failures(), 0);

    fs::remove_file(path).unwrap();
}

#[test]
fn texture_slot() {
    let (device, _) = headless();

    let texture = Texture::from_rgba(&device, 1, 1, &[255; 4], TextureParams::default()).unwrap();
    match texture.bind(MAX_TEXTURE_SLOTS) {
        Err(Error::TextureSlot(16, 16)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(texture.bind(MAX_TEXTURE_SLOTS - 1).is_ok());
}

#[test]
fn texture_data_size() {
    let (device, state) = headless();

    match Texture::from_rgba(&device, 2, 2, &[0; 15], TextureParams::default()) {
        Err(Error::TextureDataSize(15, 16)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a texture from short data"),
    }

    match Texture::from_rgba(&device, u32::MAX, u32::MAX, &[0; 4], TextureParams::default()) {
        Err(Error::TextureDataSize(4, _)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a texture with overflowing dimensions"),
    }

    assert_eq!(state.borrow().live_objects(), 0);
}

#[test]
fn undecodable() {
    let (device, state) = headless();

    let path = std::env::temp_dir().join(format!("glsandbox-{}-garbage.png", std::process::id()));
    fs::write(&path, b"definitely not a png").unwrap();

    match Texture::from_file(&device, &path) {
        Err(Error::TextureDecode { path: p, .. }) => assert_eq!(p, path),
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a texture from garbage"),
    }

    assert_eq!(state.borrow().live_objects(), 0);
    fs::remove_file(path).unwrap();
}

#[test]
fn cube_map() {
    let (device, state) = headless();

    let faces: Vec<_> = ["right", "left", "top", "bottom", "front", "back"]
        .iter()
        .map(|v| png(&format!("cube-{}", v), 4, 4))
        .collect();

    let texture = Texture::cube_map(&device, &faces).unwrap();
    assert_eq!(texture.target(), TextureTarget::CubeMap);

    {
        let state = state.borrow();
        let object = &state.textures[&texture.id()];
        assert_eq!(object.images.len(), 6);

        for face in CubeFace::ALL.iter() {
            let pixels = &object.pixels[&ImageTarget::CubeFace(*face)];
            // Faces keep the row order of their files.
            assert_eq!(pixels[0], 0);
            assert_eq!(pixels[3 * 4 * 4], 3);
        }
    }

    texture.bind(2).unwrap();
    assert_eq!(state.borrow().bound_texture(2, TextureTarget::CubeMap), texture.id());
    assert_eq!(device.failures(), 0);

    match Texture::cube_map(&device, &faces[..5]) {
        Err(Error::CubeMapFaces(5)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a cube map with five faces"),
    }

    let mut mismatched = faces.clone();
    mismatched[4] = png("cube-small", 2, 2);
    match Texture::cube_map(&device, &mismatched) {
        Err(Error::CubeMapFaceSize(ref p)) => assert_eq!(p, &mismatched[4]),
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a cube map with mismatched faces"),
    }

    for path in faces.iter().chain(Some(&mismatched[4])) {
        fs::remove_file(path).unwrap();
    }
}

#[test]
fn drop_releases() {
    let (device, state) = headless();

    {
        let texture = Texture::empty(&device, 8, 8, TextureParams::default());
        texture.bind(1).unwrap();
        assert_eq!(state.borrow().live_objects(), 1);
    }

    let state = state.borrow();
    assert_eq!(state.live_objects(), 0);
    assert_eq!(state.bound_texture(1, TextureTarget::Texture2D), 0);
}
