//! Switchable demo scenes.
//!
//! A `Gallery` owns a long-lived `SceneMenu` plus at most one transient scene. The menu
//! lists the registered scenes, and picking one drops whatever scene was running before
//! the new one is constructed.

pub mod gallery;
pub mod menu;

pub use self::gallery::Gallery;
pub use self::menu::{SceneFactory, SceneMenu};

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::errors::Result;
use crate::input::Input;
use crate::video::device::Device;

/// A demo scene. Every callback defaults to doing nothing.
pub trait Scene {
    fn on_update(&mut self, _dt: f32) -> Result<()> {
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_ui(&mut self, _ui: &mut dyn Ui) -> Result<()> {
        Ok(())
    }

    fn process_input(&mut self, _input: &Input, _dt: f32) -> Result<()> {
        Ok(())
    }
}

/// The immediate-mode widgets scenes can draw. Widgets that edit a value return `true`
/// when the value changed during this frame.
pub trait Ui {
    fn text(&mut self, text: &str);

    /// Returns `true` if the button was activated.
    fn button(&mut self, label: &str) -> bool;

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;

    fn slider_f32(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool;

    fn color_edit4(&mut self, label: &str, color: &mut [f32; 4]) -> bool;
}

/// What a scene factory gets to build a scene with.
#[derive(Clone)]
pub struct SceneContext {
    pub device: Rc<Device>,
    pub assets: PathBuf,
}

impl SceneContext {
    pub fn new<P: Into<PathBuf>>(device: Rc<Device>, assets: P) -> Self {
        SceneContext {
            device,
            assets: assets.into(),
        }
    }

    /// Resolves a path relative to the asset root.
    pub fn asset<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.assets.join(path)
    }
}
