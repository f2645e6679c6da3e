pub mod batch;
pub mod clear_color;
pub mod cube_3d;
pub mod cubemap;
pub mod dynamic_batch;
pub mod framebuffers;
pub mod instancing;
pub mod lighting;
pub mod mesh;
pub mod orbit;
pub mod static_batch;
pub mod stencil;
pub mod texture_2d;
pub mod textured_cube;

use std::cell::Cell;
use std::rc::Rc;

use glsandbox::prelude::*;

/// The size of the drawable area, shared between the host and the scenes that need
/// an aspect ratio.
#[derive(Debug, Clone, Default)]
pub struct Viewport(Rc<Cell<[u32; 2]>>);

impl Viewport {
    #[inline]
    pub fn get(&self) -> [u32; 2] {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, dimensions: [u32; 2]) {
        self.0.set(dimensions);
    }

    pub fn aspect(&self) -> f32 {
        let [w, h] = self.get();
        if h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }
}

/// Registers every demo scene in the order they are listed.
pub fn register(menu: &mut SceneMenu, viewport: &Viewport) {
    menu.register::<clear_color::ClearColor>("Clear Color");

    let v = viewport.clone();
    menu.register_with("2D Texture", move |ctx| texture_2d::Texture2D::new(ctx, v.clone()));

    let v = viewport.clone();
    menu.register_with("Batch Rendering", move |ctx| {
        static_batch::StaticBatch::new(ctx, v.clone())
    });

    let v = viewport.clone();
    menu.register_with("Batch Rendering (dynamic geometry)", move |ctx| {
        dynamic_batch::DynamicBatch::new(ctx, v.clone())
    });

    let v = viewport.clone();
    menu.register_with("3D Cube", move |ctx| cube_3d::Cube3D::new(ctx, v.clone()));

    let v = viewport.clone();
    menu.register_with("3D Cube (textured)", move |ctx| {
        textured_cube::TexturedCube::new(ctx, v.clone())
    });

    let v = viewport.clone();
    menu.register_with("Camera Example", move |ctx| orbit::Orbit::new(ctx, v.clone()));

    let v = viewport.clone();
    menu.register_with("Basic Lighting", move |ctx| lighting::Lighting::new(ctx, v.clone()));

    let v = viewport.clone();
    menu.register_with("Instancing", move |ctx| instancing::Instancing::new(ctx, v.clone()));

    let v = viewport.clone();
    menu.register_with("Cube Map", move |ctx| cubemap::Skybox::new(ctx, v.clone()));

    let v = viewport.clone();
    menu.register_with("Framebuffers", move |ctx| {
        framebuffers::PostProcessing::new(ctx, v.clone())
    });

    let v = viewport.clone();
    menu.register_with("Stencil Outline", move |ctx| stencil::Outline::new(ctx, v.clone()));
}
