//! # GL Sandbox
//!
//! A small playground for real-time rendering on top of OpenGL 3.3. It wraps the GPU
//! objects a demo needs (buffers, vertex arrays, textures, shader programs and
//! framebuffers) in owning handles, and provides a gallery that switches between demo
//! scenes at runtime.
//!
//! Everything is single-threaded: handles share a `video::Device`, which owns the
//! backend that talks to the OpenGL context of the current thread. The headless backend
//! models the device in memory, so the whole crate can be exercised without a window.

#[macro_use]
pub extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub extern crate cgmath;
#[cfg(not(target_arch = "wasm32"))]
pub extern crate gl;

#[macro_use]
pub mod video;

pub mod errors;
pub mod input;
pub mod scene;
pub mod settings;

pub mod prelude {
    pub use crate::errors::Result;
    pub use crate::input::{Input, Key};
    pub use crate::scene::{Gallery, Scene, SceneContext, SceneFactory, SceneMenu, Ui};
    pub use crate::settings::{Settings, WindowParams};
    pub use crate::video::prelude::*;
}
